//! Commands run against a wiremock content API.

use std::process::Output;

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FAST_CONFIG: &str = "[quiz]\ntick_millis = 10\n";

/// Run the binary on a blocking thread so the mock server keeps serving.
async fn run(server: &MockServer, dir: &TempDir, args: &[&str], stdin: &str) -> Output {
    let base_url = format!("{}/api", server.uri());
    let cwd = dir.path().to_path_buf();
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let stdin = stdin.to_string();

    tokio::task::spawn_blocking(move || {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("quizport").unwrap();
        cmd.current_dir(&cwd)
            .env("HOME", &cwd)
            .env("QUIZPORT_BASE_URL", base_url)
            .env("QUIZPORT_TOKEN", "student-token")
            .args(&args)
            .write_stdin(stdin)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("quizport.toml"), FAST_CONFIG).unwrap();
    dir
}

async fn mount_one_question(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/quiz/questions/Networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "_id": "q1",
            "question": "Which layer routes packets?",
            "options": ["Network", "Transport", "Session", "Physical"],
            "answer": "Network"
        }])))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn take_submits_once_and_prints_summary() {
    let server = MockServer::start().await;
    mount_one_question(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/quiz/submit"))
        .and(header("Authorization", "Bearer student-token"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = workspace();
    let output = run(&server, &dir, &["take", "--subject", "Networks"], "1\ns\n").await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands: 1-4 select"))
        .stdout(predicate::str::contains("Question 1/1"))
        .stdout(predicate::str::contains("Selected:"))
        .stdout(predicate::str::contains("Quiz Summary: Networks"))
        .stdout(predicate::str::contains("Total Questions: 1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn take_submits_on_expiry_when_input_ends() {
    let server = MockServer::start().await;
    mount_one_question(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/quiz/submit"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = workspace();
    let output = run(
        &server,
        &dir,
        &["take", "--subject", "Networks", "--duration", "3"],
        "",
    )
    .await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Time is up!"))
        .stdout(predicate::str::contains("Correct Answers: 0"))
        .stdout(predicate::str::contains("Wrong Answers:   1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn take_quit_submits_nothing() {
    let server = MockServer::start().await;
    mount_one_question(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/quiz/submit"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let dir = workspace();
    let output = run(&server, &dir, &["take", "--subject", "Networks"], "q\n").await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing was submitted"));
}

/// Start `take` with stdin held open, wait for the first question, then
/// send SIGINT until the process exits.
#[cfg(unix)]
fn interrupt_take(dir: &TempDir, base_url: String) -> (std::process::ExitStatus, String) {
    use std::io::{BufRead, BufReader};
    use std::process::{Command as StdCommand, Stdio};
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    let mut child = StdCommand::new(env!("CARGO_BIN_EXE_quizport"))
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("QUIZPORT_BASE_URL", base_url)
        .env("QUIZPORT_TOKEN", "student-token")
        .args(["take", "--subject", "Networks"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let _stdin = child.stdin.take();

    let stdout = child.stdout.take().unwrap();
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in BufReader::new(stdout).lines().map_while(Result::ok) {
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut transcript = String::new();
    loop {
        let line = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        transcript.push_str(&line);
        transcript.push('\n');
        if line.starts_with("Question 1/1") {
            break;
        }
    }

    let deadline = Instant::now() + Duration::from_secs(5);
    let status = loop {
        StdCommand::new("kill")
            .args(["-INT", &child.id().to_string()])
            .status()
            .unwrap();
        std::thread::sleep(Duration::from_millis(200));
        if let Some(status) = child.try_wait().unwrap() {
            break status;
        }
        if Instant::now() > deadline {
            child.kill().unwrap();
            panic!("take kept running after Ctrl-C:\n{transcript}");
        }
    };

    while let Ok(line) = rx.recv_timeout(Duration::from_secs(1)) {
        transcript.push_str(&line);
        transcript.push('\n');
    }
    (status, transcript)
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread")]
async fn ctrl_c_during_quiz_abandons_without_submitting() {
    let server = MockServer::start().await;
    mount_one_question(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/quiz/submit"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let dir = workspace();
    let base_url = format!("{}/api", server.uri());
    let (status, stdout) = tokio::task::spawn_blocking(move || interrupt_take(&dir, base_url))
        .await
        .unwrap();

    assert!(status.success(), "exit status {status}");
    assert!(stdout.contains("nothing was submitted"), "{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn take_reports_next_before_answer_and_rejected_submission() {
    let server = MockServer::start().await;
    mount_one_question(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/quiz/submit"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Error submitting quiz"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = workspace();
    let output = run(
        &server,
        &dir,
        &["take", "--subject", "Networks"],
        "n\ns\n2\nn\ns\n",
    )
    .await;

    output
        .assert()
        .failure()
        .stdout(predicate::str::contains("Select an option before moving on."))
        .stdout(predicate::str::contains("has not been answered"))
        .stdout(predicate::str::contains("This is the last question"))
        .stderr(predicate::str::contains("failed to submit results for 'Networks'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_subject_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quiz/questions/Empty"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let dir = workspace();
    let output = run(&server, &dir, &["take", "--subject", "Empty"], "").await;

    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("no questions available for 'Empty'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn instructions_show_question_count() {
    let server = MockServer::start().await;
    mount_one_question(&server).await;

    let dir = TempDir::new().unwrap();
    let output = run(&server, &dir, &["instructions", "--subject", "Networks"], "").await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of questions:   1"))
        .stdout(predicate::str::contains("Time allowed:          30:00"))
        .stdout(predicate::str::contains("Negative marking:      No"));
}

#[tokio::test(flavor = "multi_thread")]
async fn history_prints_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quiz/history"))
        .and(header("Authorization", "Bearer student-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "_id": "attempt-7",
            "subject": "DBMS",
            "date": "2024-04-02T08:15:00.000Z",
            "results": [
                {"questionId": "q1", "userAnswer": "3NF", "correctAnswer": "3NF", "isCorrect": true},
                {"questionId": "q2", "userAnswer": null, "correctAnswer": "BCNF", "isCorrect": false}
            ]
        }])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = run(&server, &dir, &["history"], "").await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("DBMS"))
        .stdout(predicate::str::contains("1 / 2"))
        .stdout(predicate::str::contains("attempt-7"));
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_history_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quiz/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = run(&server, &dir, &["history"], "").await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("No quizzes taken yet."));
}

#[tokio::test(flavor = "multi_thread")]
async fn detail_prints_review_and_writes_html() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quiz/details/attempt-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_id": "attempt-7",
            "subject": "DBMS",
            "date": "2024-04-02T08:15:00.000Z",
            "results": [{
                "questionId": {"_id": "q1", "question": "Highest normal form?", "options": ["2NF", "3NF", "BCNF", "1NF"]},
                "userAnswer": "3NF",
                "correctAnswer": "BCNF",
                "isCorrect": false
            }]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = run(
        &server,
        &dir,
        &["detail", "--id", "attempt-7", "--html", "review/attempt-7.html"],
        "",
    )
    .await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Q1: Highest normal form?"))
        .stdout(predicate::str::contains("BCNF  [Correct]"))
        .stdout(predicate::str::contains("3NF  [Wrong]"));

    let html = std::fs::read_to_string(dir.path().join("review/attempt-7.html")).unwrap();
    assert!(html.contains("Quiz Details for DBMS"));
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_attempt_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quiz/details/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = run(&server, &dir, &["detail", "--id", "gone"], "").await;

    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not load attempt 'gone'"));
}

#[tokio::test(flavor = "multi_thread")]
async fn admin_results_table_and_csv() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/results/DBMS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "user": {"name": "Asha", "rollNo": "CS-01"},
            "results": [
                {"questionId": "q1", "userAnswer": "a", "correctAnswer": "a", "isCorrect": true},
                {"questionId": "q2", "userAnswer": "b", "correctAnswer": "a", "isCorrect": false}
            ]
        }])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = run(
        &server,
        &dir,
        &["admin-results", "--subject", "DBMS", "--csv", "DBMS.csv"],
        "",
    )
    .await;

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("DBMS Quiz Results"))
        .stdout(predicate::str::contains("CS-01"))
        .stdout(predicate::str::contains("Asha"));

    let csv = std::fs::read_to_string(dir.path().join("DBMS.csv")).unwrap();
    assert_eq!(csv, "Roll No,Name,Score\nCS-01,Asha,1\n");
}

//! Failed API calls leave an error-level diagnostic naming the operation.
//!
//! # Design
//! The `log` facade accepts one logger per process, so this file is its own
//! test binary with a single capturing logger installed once.

use std::sync::{Mutex, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};
use roster_core::{
    ApiError, HttpRequest, HttpResponse, PlayerApi, PlayerClient, PlayerId, Transport,
    TransportError,
};

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
static INSTALL: Once = Once::new();

struct Capture;

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture;

fn install() {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Debug);
    });
}

fn errors_containing(needle: &str) -> usize {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, message)| *level == Level::Error && message.contains(needle))
        .count()
}

/// Answers every request with the same status and body.
struct Fixed(u16, &'static str);

impl Transport for Fixed {
    async fn execute(&self, _: HttpRequest) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: self.0,
            headers: Vec::new(),
            body: self.1.to_string(),
        })
    }
}

fn api(status: u16, body: &'static str) -> PlayerApi<Fixed> {
    PlayerApi::new(
        PlayerClient::new("http://localhost:3000/api/demo"),
        Fixed(status, body),
    )
}

#[tokio::test]
async fn non_2xx_responses_are_logged_per_operation() {
    install();

    let err = api(500, "{}")
        .delete_player(&PlayerId::Number(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Fetch { status: 500, .. }));
    assert_eq!(
        errors_containing("trouble removing player #1 from the roster"),
        1
    );

    api(503, "").list_players().await.unwrap_err();
    assert_eq!(errors_containing("trouble fetching players: HTTP 503"), 1);

    api(404, "").get_player(&PlayerId::Number(9)).await.unwrap_err();
    assert_eq!(errors_containing("trouble fetching player #9"), 1);
}

#[tokio::test]
async fn successful_calls_log_no_errors() {
    install();

    let ok = r#"{"success":true,"error":null,"data":{"player":{"id":"ok-1","name":"Rex","age":2,"breed":"Hound"}}}"#;
    api(200, ok)
        .get_player(&PlayerId::Text("ok-1".to_string()))
        .await
        .unwrap();
    assert_eq!(errors_containing("ok-1"), 0);
}

use rstest::fixture;
use reqwest::Client;
use std::time::Duration;

#[fixture]
pub fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

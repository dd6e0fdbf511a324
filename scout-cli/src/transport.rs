use std::time::Duration;

use scout_control::{CommandSink, ConfigParam, DriveCommand, Endpoint, SPEED_MAX_SEND_DELAY_MS};

/// Sends commands to the rover over plain HTTP GET.
///
/// The [`CommandSink`] methods spawn the request and return immediately;
/// failures are logged at debug level and otherwise ignored. Requests time
/// out after the heartbeat interval, by which point a newer command has
/// already been sent.
#[derive(Clone)]
pub struct HttpSink {
    http: reqwest::Client,
    endpoint: Endpoint,
}

impl HttpSink {
    pub fn new(endpoint: Endpoint) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(SPEED_MAX_SEND_DELAY_MS))
            .build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.http
    }

    fn spawn_get(&self, url: String) {
        let http = self.http.clone();
        tokio::spawn(async move {
            match http.get(&url).send().await {
                Ok(response) => log::debug!("GET {url} -> {}", response.status()),
                Err(e) => log::debug!("request to {url} dropped: {e}"),
            }
        });
    }

    /// Send a drive command and wait for it to settle. Used for the final
    /// stop on exit, when a spawned request would not outlive the runtime.
    pub async fn drive_now(&self, cmd: DriveCommand) -> reqwest::Result<reqwest::StatusCode> {
        let response = self.http.get(self.endpoint.drive_url(&cmd)).send().await?;
        Ok(response.status())
    }

    pub async fn set_parameter_now(
        &self,
        param: &ConfigParam,
    ) -> reqwest::Result<reqwest::StatusCode> {
        let response = self.http.get(self.endpoint.config_url(param)).send().await?;
        Ok(response.status())
    }
}

impl CommandSink for HttpSink {
    fn drive(&self, cmd: DriveCommand) {
        self.spawn_get(self.endpoint.drive_url(&cmd));
    }

    fn set_parameter(&self, param: &ConfigParam) {
        self.spawn_get(self.endpoint.config_url(param));
    }
}

//! Terminal front end for the dashboard
//!
//! Each stdin line is a query for every persona; `:history` reprints the
//! panels and `:quit` exits. Rendering is plain text so it can be tested
//! without a terminal.

use friday_core::dashboard::SIMULATED_DELAY;
use friday_core::utils::random_greeting;
use friday_core::{
    proxy_client_timeout, DashboardState, FridayError, Logger, PersonaPanel, Result,
    SubmitOutcome, DEFAULT_REQUEST_TIMEOUT,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

#[derive(Clone, Debug)]
pub struct TerminalConfig {
    /// Base URL of the proxy server (`<base>/api/<persona>`)
    pub proxy_base_url: String,
    /// Proxy call timeout; longer than the proxy's own upstream timeout
    pub request_timeout: Duration,
    /// Answer with simulated personas instead of calling the proxy
    pub offline: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            proxy_base_url: "http://127.0.0.1:4000".to_string(),
            request_timeout: proxy_client_timeout(DEFAULT_REQUEST_TIMEOUT),
            offline: false,
        }
    }
}

/// One line of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    History,
    Query(String),
}

impl Command {
    /// Parse a line with its line ending already removed
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":quit" | ":q" => Command::Quit,
            ":history" => Command::History,
            _ => Command::Query(line.to_string()),
        }
    }
}

/// Heading printed once at startup
pub fn render_header(panel: &PersonaPanel, greeting: &str) -> String {
    let title = panel
        .personas()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(" x ");
    format!("==== {} ====\n{}\n", title, greeting)
}

/// Error banner, response panel and history panel for `state`
pub fn render_dashboard(state: &DashboardState) -> String {
    let mut out = String::new();

    if let Some(error) = state.error_message() {
        out.push_str(&format!("[!] {}\n\n", error));
    }

    if let Some(response) = state.response() {
        out.push_str("--- Response ---\n");
        out.push_str(response.as_str());
        out.push_str("\n\n");
    }

    if !state.history().is_empty() {
        out.push_str("--- History ---\n");
        for entry in state.history().visible() {
            out.push_str(&format!(
                "Query: {}\nResponse: {}\n{}\n\n",
                entry.query(),
                entry.response(),
                entry.formatted_timestamp()
            ));
        }
    }

    out
}

/// Dashboard driven by terminal lines
pub struct TerminalDashboard {
    panel: PersonaPanel,
    state: Arc<Mutex<DashboardState>>,
    greeting: &'static str,
    logger: Logger,
}

impl TerminalDashboard {
    /// Proxied personas, or simulated ones when `config.offline`
    pub fn new(config: &TerminalConfig) -> Result<Self> {
        let panel = if config.offline {
            PersonaPanel::simulated(SIMULATED_DELAY)
        } else {
            PersonaPanel::proxied(&config.proxy_base_url, config.request_timeout)?
        };
        Ok(Self::with_panel(panel))
    }

    pub fn with_panel(panel: PersonaPanel) -> Self {
        Self {
            panel,
            state: Arc::new(Mutex::new(DashboardState::new())),
            greeting: random_greeting(),
            logger: Logger::new("terminal"),
        }
    }

    /// Shared dashboard state
    pub fn state(&self) -> Arc<Mutex<DashboardState>> {
        self.state.clone()
    }

    /// Submit `query`. The state lock is not held while personas answer.
    pub async fn submit(&self, query: impl Into<String>) -> SubmitOutcome {
        let pending = {
            let mut state = self.state.lock().await;
            state.set_query(query);
            match state.begin_submission() {
                Ok(p) => p,
                Err(reason) => return SubmitOutcome::Ignored(reason),
            }
        };

        let result = self.panel.gather(pending.query()).await;

        self.state.lock().await.complete_submission(pending, result)
    }

    /// Read queries from `input` until EOF or `:quit`, writing panels to `output`
    pub async fn run<R, W>(&self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        write_out(&mut output, &render_header(&self.panel, self.greeting)).await?;

        while let Some(line) = lines.next_line().await? {
            match Command::parse(&line) {
                Command::Quit => break,
                Command::History => {
                    let view = render_dashboard(&*self.state.lock().await);
                    write_out(&mut output, &view).await?;
                }
                Command::Query(query) => {
                    if query.trim().is_empty() {
                        continue;
                    }
                    write_out(&mut output, "... thinking\n").await?;
                    match self.submit(query).await {
                        SubmitOutcome::Ignored(reason) => {
                            self.logger.debug(&format!("query ignored: {:?}", reason));
                        }
                        SubmitOutcome::Succeeded(_) => {}
                        SubmitOutcome::Failed(err) => {
                            self.logger.warn(&err.to_string());
                        }
                    }
                    let view = render_dashboard(&*self.state.lock().await);
                    write_out(&mut output, &view).await?;
                }
            }
        }

        self.logger.info("terminal dashboard closed");
        Ok(())
    }

    /// [`run`](Self::run) over stdin and stdout
    pub async fn run_stdio(&self) -> Result<()> {
        self.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }
}

async fn write_out<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output.write_all(text.as_bytes()).await.map_err(FridayError::Io)?;
    output.flush().await.map_err(FridayError::Io)
}

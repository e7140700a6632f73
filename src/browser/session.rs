use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::browser::driver::{By, Driver, ElementHandle};
use crate::error::{FixtureError, Result};

pub const DEFAULT_BROWSER_SERVER: &str = "node/browser_server.js";

/// Request sent to the browser server over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BrowserRequest {
    Navigate {
        cmd: &'static str,
        url: String,
    },
    Find {
        cmd: &'static str,
        by: By,
        #[serde(skip_serializing_if = "Option::is_none")]
        scope: Option<ElementHandle>,
    },
    Attribute {
        cmd: &'static str,
        element: ElementHandle,
        name: String,
    },
    SendKeys {
        cmd: &'static str,
        element: ElementHandle,
        text: String,
    },
    MoveTo {
        cmd: &'static str,
        element: ElementHandle,
        #[serde(skip_serializing_if = "Option::is_none")]
        x: Option<i32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        y: Option<i32>,
    },
    Element {
        cmd: &'static str,
        element: ElementHandle,
    },
    Window {
        cmd: &'static str,
        name: String,
    },
    Script {
        cmd: &'static str,
        script: String,
        args: Vec<Value>,
    },
    Bare {
        cmd: &'static str,
    },
}

impl BrowserRequest {
    pub fn navigate(url: &str) -> Self {
        BrowserRequest::Navigate {
            cmd: "navigate",
            url: url.to_string(),
        }
    }

    pub fn find(by: &By, scope: Option<&ElementHandle>) -> Self {
        BrowserRequest::Find {
            cmd: "find",
            by: by.clone(),
            scope: scope.cloned(),
        }
    }

    pub fn attribute(element: &ElementHandle, name: &str) -> Self {
        BrowserRequest::Attribute {
            cmd: "attribute",
            element: element.clone(),
            name: name.to_string(),
        }
    }

    pub fn send_keys(element: &ElementHandle, text: &str) -> Self {
        BrowserRequest::SendKeys {
            cmd: "send_keys",
            element: element.clone(),
            text: text.to_string(),
        }
    }

    pub fn move_to(element: &ElementHandle, offset: Option<(i32, i32)>) -> Self {
        BrowserRequest::MoveTo {
            cmd: "move_to",
            element: element.clone(),
            x: offset.map(|(x, _)| x),
            y: offset.map(|(_, y)| y),
        }
    }

    /// A command that targets one element and carries nothing else.
    pub fn element(cmd: &'static str, element: &ElementHandle) -> Self {
        BrowserRequest::Element {
            cmd,
            element: element.clone(),
        }
    }

    pub fn switch_window(name: &str) -> Self {
        BrowserRequest::Window {
            cmd: "switch_window",
            name: name.to_string(),
        }
    }

    pub fn script(script: &str, args: &[Value]) -> Self {
        BrowserRequest::Script {
            cmd: "script",
            script: script.to_string(),
            args: args.to_vec(),
        }
    }

    pub fn bare(cmd: &'static str) -> Self {
        BrowserRequest::Bare { cmd }
    }

    pub fn quit() -> Self {
        BrowserRequest::bare("quit")
    }
}

/// Response received from the browser server over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BrowserResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub elements: Option<Vec<ElementHandle>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub flag: Option<bool>,
}

/// A persistent browser session backed by a Node.js browser server.
///
/// Launches a long-lived process that keeps a browser open. Commands are
/// sent as NDJSON over stdin, responses read from stdout. Element handles
/// are ids assigned by the server.
pub struct BrowserSession {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
    closed: bool,
}

impl BrowserSession {
    /// Launch a new browser session by spawning the server script.
    pub fn launch(script: &str) -> Result<Self> {
        let mut command = Command::new("node");
        command.arg(script);
        Self::spawn(command, script)
    }

    /// Start `command` as the browser server and wait for its ready line.
    /// `label` names the server in errors. A server that never reports
    /// ready is killed before the error is returned.
    pub fn spawn(mut command: Command, label: &str) -> Result<Self> {
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| FixtureError::SubprocessSpawn {
                script: label.to_string(),
                source: e,
            })?;

        match Self::handshake(&mut child, label) {
            Ok((stdin, reader)) => {
                debug!(server = label, "browser session ready");
                Ok(BrowserSession {
                    child,
                    stdin,
                    reader,
                    closed: false,
                })
            }
            Err(e) => {
                if let Err(kill) = child.kill() {
                    warn!(server = label, error = %kill, "failed to kill browser server");
                }
                let _ = child.wait();
                Err(e)
            }
        }
    }

    fn handshake(
        child: &mut Child,
        label: &str,
    ) -> Result<(std::process::ChildStdin, BufReader<std::process::ChildStdout>)> {
        let stdin = child.stdin.take().ok_or_else(|| {
            FixtureError::SessionIO(format!("Failed to capture stdin of {}", label))
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            FixtureError::SessionIO(format!("Failed to capture stdout of {}", label))
        })?;

        let mut reader = BufReader::new(stdout);

        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| FixtureError::SessionIO(format!("Failed to read ready signal: {}", e)))?;

        let response: BrowserResponse =
            serde_json::from_str(line.trim()).map_err(|e| FixtureError::JsonParse {
                context: "browser server ready signal".into(),
                source: e,
            })?;

        if !response.ok || response.ready != Some(true) {
            return Err(FixtureError::driver(
                "launch",
                "did not receive ready signal from browser server",
            ));
        }

        Ok((stdin, reader))
    }

    /// Send a request and read the response.
    fn send(&mut self, request: &BrowserRequest) -> Result<BrowserResponse> {
        let json = serde_json::to_string(request).map_err(|e| FixtureError::JsonSerialize {
            context: "BrowserRequest".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json).map_err(|e| {
            FixtureError::SessionIO(format!("Failed to write to browser server stdin: {}", e))
        })?;

        self.stdin.flush().map_err(|e| {
            FixtureError::SessionIO(format!("Failed to flush browser server stdin: {}", e))
        })?;

        let mut line = String::new();
        self.reader.read_line(&mut line).map_err(|e| {
            FixtureError::SessionIO(format!("Failed to read from browser server stdout: {}", e))
        })?;

        if line.trim().is_empty() {
            return Err(FixtureError::SessionIO(
                "Empty response from browser server (process may have died)".into(),
            ));
        }

        serde_json::from_str(line.trim()).map_err(|e| FixtureError::JsonParse {
            context: "browser server response".into(),
            source: e,
        })
    }

    /// Send a request and verify it succeeded.
    fn send_ok(&mut self, request: &BrowserRequest, command: &str) -> Result<BrowserResponse> {
        let response = self.send(request)?;
        if !response.ok {
            return Err(FixtureError::driver(
                command,
                response.error.unwrap_or_else(|| "Unknown error".into()),
            ));
        }
        Ok(response)
    }

    fn element_command(&mut self, cmd: &'static str, element: &ElementHandle) -> Result<BrowserResponse> {
        self.send_ok(&BrowserRequest::element(cmd, element), cmd)
    }

    fn bare_command(&mut self, cmd: &'static str) -> Result<BrowserResponse> {
        self.send_ok(&BrowserRequest::bare(cmd), cmd)
    }

    fn expect_flag(response: BrowserResponse, command: &str) -> Result<bool> {
        response
            .flag
            .ok_or_else(|| FixtureError::driver(command, "no flag in response"))
    }

    /// Quit the browser session.
    pub fn quit(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        // Best-effort: the process may already be gone
        if let Err(e) = self.send(&BrowserRequest::quit()) {
            warn!(error = %e, "browser server did not acknowledge quit");
        }
        let _ = self.child.wait();
        Ok(())
    }
}

impl Driver for BrowserSession {
    fn find_elements(&mut self, by: &By, scope: Option<&ElementHandle>) -> Result<Vec<ElementHandle>> {
        let response = self.send_ok(&BrowserRequest::find(by, scope), "find")?;
        Ok(response.elements.unwrap_or_default())
    }

    fn tag_name(&mut self, element: &ElementHandle) -> Result<String> {
        let response = self.element_command("tag_name", element)?;
        Ok(response.text.unwrap_or_default().to_ascii_lowercase())
    }

    fn attribute(&mut self, element: &ElementHandle, name: &str) -> Result<Option<String>> {
        let response = self.send_ok(&BrowserRequest::attribute(element, name), "attribute")?;
        Ok(response.value)
    }

    fn text(&mut self, element: &ElementHandle) -> Result<String> {
        let response = self.element_command("text", element)?;
        Ok(response.text.unwrap_or_default())
    }

    fn is_selected(&mut self, element: &ElementHandle) -> Result<bool> {
        let response = self.element_command("is_selected", element)?;
        Self::expect_flag(response, "is_selected")
    }

    fn is_displayed(&mut self, element: &ElementHandle) -> Result<bool> {
        let response = self.element_command("is_displayed", element)?;
        Self::expect_flag(response, "is_displayed")
    }

    fn click(&mut self, element: &ElementHandle) -> Result<()> {
        self.element_command("click", element).map(|_| ())
    }

    fn double_click(&mut self, element: &ElementHandle) -> Result<()> {
        self.element_command("double_click", element).map(|_| ())
    }

    fn move_to(&mut self, element: &ElementHandle, offset: Option<(i32, i32)>) -> Result<()> {
        self.send_ok(&BrowserRequest::move_to(element, offset), "move_to")
            .map(|_| ())
    }

    fn clear(&mut self, element: &ElementHandle) -> Result<()> {
        self.element_command("clear", element).map(|_| ())
    }

    fn send_keys(&mut self, element: &ElementHandle, text: &str) -> Result<()> {
        self.send_ok(&BrowserRequest::send_keys(element, text), "send_keys")
            .map(|_| ())
    }

    fn submit(&mut self, element: &ElementHandle) -> Result<()> {
        self.element_command("submit", element).map(|_| ())
    }

    fn navigate(&mut self, url: &str) -> Result<()> {
        self.send_ok(&BrowserRequest::navigate(url), "navigate")?;
        Ok(())
    }

    fn back(&mut self) -> Result<()> {
        self.bare_command("back").map(|_| ())
    }

    fn forward(&mut self) -> Result<()> {
        self.bare_command("forward").map(|_| ())
    }

    fn refresh(&mut self) -> Result<()> {
        self.bare_command("refresh").map(|_| ())
    }

    fn current_url(&mut self) -> Result<String> {
        let response = self.bare_command("current_url")?;
        let url = response
            .url
            .ok_or_else(|| FixtureError::driver("current_url", "no URL in response"))?;
        Ok(url)
    }

    fn title(&mut self) -> Result<String> {
        let response = self.bare_command("title")?;
        Ok(response.text.unwrap_or_default())
    }

    fn switch_to_frame(&mut self, frame: &ElementHandle) -> Result<()> {
        self.element_command("switch_frame", frame).map(|_| ())
    }

    fn switch_to_parent_frame(&mut self) -> Result<()> {
        self.bare_command("switch_parent_frame").map(|_| ())
    }

    fn switch_to_default_content(&mut self) -> Result<()> {
        self.bare_command("switch_default_content").map(|_| ())
    }

    fn switch_to_window(&mut self, name: &str) -> Result<()> {
        self.send_ok(&BrowserRequest::switch_window(name), "switch_window")
            .map(|_| ())
    }

    fn execute_script(&mut self, script: &str, args: &[Value]) -> Result<Value> {
        let response = self.send_ok(&BrowserRequest::script(script, args), "script")?;
        Ok(response.data.unwrap_or(Value::Null))
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        let _ = self.quit();
    }
}

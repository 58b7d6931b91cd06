// Local gateway process supervision.
//
// `ServerSupervisor` launches the gateway as a child process and drains its
// combined stdout/stderr into a bounded `LogBuffer` on one background
// thread. Readiness is gated on `GET /health`; `stop` terminates the
// child's whole process group and reaps the child.

use std::ffi::{OsStr, OsString};
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::StatusCode;
use thiserror::Error;

use crate::log_buffer::{LogBuffer, DEFAULT_LOG_CAPACITY};

/// Delay between two health probes.
pub const HEALTH_POLL_INTERVAL: Duration = Duration::from_millis(200);
/// Upper bound for a single health probe.
pub const HEALTH_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);
/// How long startup waits for the gateway before giving up.
pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(30);
/// How long `stop` waits after SIGTERM before killing the child outright.
pub const STOP_GRACE_PERIOD: Duration = Duration::from_secs(3);
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("`{program}` was not found; make sure it is installed and on PATH")]
    ExecutableNotFound { program: String },
    #[error("server directory {} does not exist", path.display())]
    MissingWorkingDir { path: PathBuf },
    #[error("failed to spawn `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to set up the server output pipe")]
    Pipe(#[source] io::Error),
    #[error("failed to start the log drain thread")]
    DrainThread(#[source] io::Error),
    #[error("the server is already running")]
    AlreadyRunning,
    #[error("timed out after {0:?} waiting for the server health check")]
    HealthTimeout(Duration),
}

/// Fixed command line used to launch the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub working_dir: PathBuf,
}

impl ServerCommand {
    pub fn new<I, S>(program: impl AsRef<OsStr>, args: I, working_dir: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self {
            program: program.as_ref().to_os_string(),
            args: args.into_iter().map(|a| a.as_ref().to_os_string()).collect(),
            working_dir: working_dir.into(),
        }
    }

    /// `go run cmd/server/main.go` inside the gateway checkout.
    pub fn go_run(server_dir: impl Into<PathBuf>) -> Self {
        Self::new("go", ["run", "cmd/server/main.go"], server_dir)
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

/// Owns the locally spawned gateway process and its captured output.
pub struct ServerSupervisor {
    command: ServerCommand,
    health_url: String,
    child: Option<Child>,
    running: Arc<AtomicBool>,
    logs: Arc<Mutex<LogBuffer>>,
    drain: Option<JoinHandle<()>>,
}

impl ServerSupervisor {
    pub fn new(command: ServerCommand, base_url: &str) -> Self {
        Self::with_log_capacity(command, base_url, DEFAULT_LOG_CAPACITY)
    }

    pub fn with_log_capacity(command: ServerCommand, base_url: &str, capacity: usize) -> Self {
        Self {
            command,
            health_url: health_url(base_url),
            child: None,
            running: Arc::new(AtomicBool::new(false)),
            logs: Arc::new(Mutex::new(LogBuffer::with_capacity(capacity))),
            drain: None,
        }
    }

    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    /// True while a spawned child exists, `stop` has not been called and
    /// the child has not exited on its own.
    pub fn is_running(&mut self) -> bool {
        self.child.is_some() && self.running.load(Ordering::SeqCst) && !self.child_exited()
    }

    // Reaps the child if it already exited. The drain thread keeps reading
    // so the last lines (a compile error, say) still reach the buffer.
    fn child_exited(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return false;
        };
        match child.try_wait() {
            Ok(Some(status)) => {
                tracing::debug!(%status, "Gateway server exited on its own");
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Could not query gateway server status");
                false
            }
        }
    }

    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    /// Spawn the gateway with stdout and stderr merged into one pipe and
    /// start the drain thread. Nothing is spawned when the working
    /// directory or the executable is missing.
    pub fn start(&mut self) -> Result<(), SupervisorError> {
        if self.is_running() {
            return Err(SupervisorError::AlreadyRunning);
        }
        if !self.command.working_dir.is_dir() {
            return Err(SupervisorError::MissingWorkingDir {
                path: self.command.working_dir.clone(),
            });
        }

        let (reader, writer) = io::pipe().map_err(SupervisorError::Pipe)?;
        let stderr_writer = writer.try_clone().map_err(SupervisorError::Pipe)?;

        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args)
            .current_dir(&self.command.working_dir)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer);

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // Own process group so stop() reaches `go run`'s children too.
            cmd.process_group(0);
        }

        let child = cmd.spawn().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                SupervisorError::ExecutableNotFound {
                    program: self.command.program_name(),
                }
            } else {
                SupervisorError::Spawn {
                    program: self.command.program_name(),
                    source,
                }
            }
        })?;
        // The command still holds the parent's write ends; the reader only
        // sees EOF once those are closed.
        drop(cmd);

        tracing::info!(
            pid = child.id(),
            program = %self.command.program_name(),
            dir = %self.command.working_dir.display(),
            "Spawned gateway server"
        );

        self.running.store(true, Ordering::SeqCst);
        self.child = Some(child);

        let running = Arc::clone(&self.running);
        let logs = Arc::clone(&self.logs);
        let drain = thread::Builder::new()
            .name("server-log-drain".into())
            .spawn(move || drain_output(reader, &running, &logs));
        match drain {
            Ok(handle) => {
                self.drain = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.stop();
                Err(SupervisorError::DrainThread(e))
            }
        }
    }

    /// Start the server and block until it answers the health check.
    /// On timeout the child is left running; the caller decides whether
    /// to stop it.
    pub fn start_and_wait(&mut self, timeout: Duration) -> Result<(), SupervisorError> {
        self.start()?;
        if self.wait_for_health(timeout) {
            Ok(())
        } else {
            Err(SupervisorError::HealthTimeout(timeout))
        }
    }

    /// Poll `GET /health` until it returns 200 or `timeout` elapses. Gives
    /// up early when the spawned child has already exited.
    pub fn wait_for_health(&mut self, timeout: Duration) -> bool {
        self.wait_for_health_with(timeout, |_| {})
    }

    /// Like [`ServerSupervisor::wait_for_health`], calling `on_attempt`
    /// after every unsuccessful probe (used to tick a spinner).
    pub fn wait_for_health_with<F>(&mut self, timeout: Duration, on_attempt: F) -> bool
    where
        F: FnMut(u32),
    {
        let url = self.health_url.clone();
        poll_health_while(&url, timeout, HEALTH_POLL_INTERVAL, on_attempt, || {
            !self.child_exited()
        })
    }

    /// Snapshot of every buffered log line, oldest first.
    pub fn logs(&self) -> Vec<String> {
        lock_logs(&self.logs).snapshot()
    }

    /// The newest `n` buffered log lines, oldest first.
    pub fn recent_logs(&self, n: usize) -> Vec<String> {
        lock_logs(&self.logs).tail(n)
    }

    /// Send SIGTERM to the child's process group (plain kill on platforms
    /// without process groups) and mark the supervisor stopped. Calling it
    /// again is a no-op.
    pub fn stop(&mut self) {
        let Some(mut child) = self.child.take() else {
            self.running.store(false, Ordering::SeqCst);
            return;
        };

        if let Err(e) = terminate(&mut child) {
            tracing::warn!(pid = child.id(), error = %e, "Failed to signal gateway server");
        }
        self.running.store(false, Ordering::SeqCst);
        reap(&mut child, STOP_GRACE_PERIOD);

        // The drain thread ends on its own once the child closes the pipe.
        self.drain.take();
    }
}

impl Drop for ServerSupervisor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// `{base}/health`, tolerating a trailing slash on the base URL.
pub fn health_url(base_url: &str) -> String {
    format!("{}/health", base_url.trim_end_matches('/'))
}

/// Fixed-interval readiness loop. Transport errors and non-200 statuses
/// count as "not ready yet"; only the overall deadline ends the wait.
pub fn poll_health<F>(url: &str, timeout: Duration, interval: Duration, on_attempt: F) -> bool
where
    F: FnMut(u32),
{
    poll_health_while(url, timeout, interval, on_attempt, || true)
}

/// [`poll_health`] that also stops as soon as `alive` returns false.
fn poll_health_while<F, A>(
    url: &str,
    timeout: Duration,
    interval: Duration,
    mut on_attempt: F,
    mut alive: A,
) -> bool
where
    F: FnMut(u32),
    A: FnMut() -> bool,
{
    let client = match Client::builder().build() {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to build health check client");
            return false;
        }
    };

    let deadline = Instant::now() + timeout;
    let mut attempt = 0u32;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        if !alive() {
            tracing::warn!(attempts = attempt, "Gateway exited before passing the health check");
            return false;
        }
        attempt += 1;
        let probe = client
            .get(url)
            .timeout(HEALTH_REQUEST_TIMEOUT.min(remaining))
            .send();
        match probe {
            Ok(resp) if resp.status() == StatusCode::OK => {
                tracing::info!(attempt, "Gateway health check passed");
                return true;
            }
            Ok(resp) => tracing::debug!(attempt, status = %resp.status(), "Gateway not ready"),
            Err(e) => tracing::debug!(attempt, error = %e, "Gateway not reachable yet"),
        }
        on_attempt(attempt);

        let remaining = deadline.saturating_duration_since(Instant::now());
        thread::sleep(interval.min(remaining));
    }

    tracing::warn!(attempts = attempt, ?timeout, "Timed out waiting for gateway health");
    false
}

fn drain_output<R: Read>(reader: R, running: &AtomicBool, logs: &Mutex<LogBuffer>) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    while running.load(Ordering::SeqCst) {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf).trim_end().to_string();
                lock_logs(logs).push(line);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(error = %e, "Stopped reading gateway output");
                break;
            }
        }
    }
    tracing::debug!("Log drain thread finished");
}

// Wait up to `grace` for the signalled child, then kill and wait.
fn reap(child: &mut Child, grace: Duration) {
    let deadline = Instant::now() + grace;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                tracing::info!(%status, "Gateway server exited");
                return;
            }
            Ok(None) if Instant::now() < deadline => thread::sleep(STOP_POLL_INTERVAL),
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Could not query gateway server status");
                break;
            }
        }
    }

    tracing::warn!(pid = child.id(), "Gateway server ignored SIGTERM; killing it");
    if let Err(e) = child.kill() {
        tracing::warn!(error = %e, "Failed to kill gateway server");
    }
    match child.wait() {
        Ok(status) => tracing::info!(%status, "Gateway server killed"),
        Err(e) => tracing::warn!(error = %e, "Could not reap gateway server"),
    }
}

// A panicking reader must not take the log view down with it.
fn lock_logs(logs: &Mutex<LogBuffer>) -> MutexGuard<'_, LogBuffer> {
    logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(unix)]
fn terminate(child: &mut Child) -> Result<(), String> {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let pgid = i32::try_from(child.id()).map_err(|e| e.to_string())?;
    killpg(Pid::from_raw(pgid), Signal::SIGTERM).map_err(|e| e.to_string())
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) -> Result<(), String> {
    child.kill().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    fn unused_port() -> u16 {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
        listener.local_addr().expect("addr").port()
    }

    #[cfg(unix)]
    fn shell(script: &str) -> ServerCommand {
        ServerCommand::new("sh", ["-c", script], std::env::temp_dir())
    }

    #[cfg(unix)]
    fn wait_for_last_line(supervisor: &ServerSupervisor, expected: &str) -> Vec<String> {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            let logs = supervisor.logs();
            if logs.last().map(String::as_str) == Some(expected) || Instant::now() > deadline {
                return logs;
            }
            thread::sleep(Duration::from_millis(20));
        }
    }

    #[cfg(unix)]
    fn wait_for_first_line(supervisor: &ServerSupervisor) -> String {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(line) = supervisor.logs().into_iter().next() {
                return line;
            }
            assert!(Instant::now() < deadline, "child printed nothing");
            thread::sleep(Duration::from_millis(20));
        }
    }

    // State letter from `/proc/<pid>/stat`, `None` once the pid is gone.
    #[cfg(target_os = "linux")]
    fn process_state(pid: u32) -> Option<char> {
        let stat = std::fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
        stat.rsplit_once(')')?.1.trim_start().chars().next()
    }

    // Orphans are reaped by whatever init the test runs under; a zombie
    // already counts as terminated.
    #[cfg(target_os = "linux")]
    fn terminated(pid: u32) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match process_state(pid) {
                None | Some('Z') => return true,
                Some(_) if Instant::now() > deadline => return false,
                Some(_) => thread::sleep(Duration::from_millis(20)),
            }
        }
    }

    #[test]
    fn health_url_strips_trailing_slash() {
        assert_eq!(health_url("http://localhost:8080/"), "http://localhost:8080/health");
        assert_eq!(health_url("http://localhost:8080"), "http://localhost:8080/health");
    }

    #[test]
    fn go_run_targets_server_main() {
        let cmd = ServerCommand::go_run("/srv/kero");
        assert_eq!(cmd.program, OsString::from("go"));
        assert_eq!(cmd.args, vec![OsString::from("run"), OsString::from("cmd/server/main.go")]);
        assert_eq!(cmd.working_dir, PathBuf::from("/srv/kero"));
    }

    #[test]
    fn missing_executable_spawns_nothing() {
        let cmd = ServerCommand::new(
            "kerokero-definitely-not-installed",
            Vec::<String>::new(),
            std::env::temp_dir(),
        );
        let mut supervisor = ServerSupervisor::new(cmd, "http://127.0.0.1:1");
        let err = supervisor.start().unwrap_err();
        assert!(matches!(err, SupervisorError::ExecutableNotFound { .. }), "{err:?}");
        assert!(!supervisor.is_running());
        assert!(supervisor.pid().is_none());
    }

    #[test]
    fn missing_working_dir_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let gone = dir.path().join("nope");
        let mut supervisor =
            ServerSupervisor::new(ServerCommand::new("sh", ["-c", "true"], gone.clone()), "http://x");
        let err = supervisor.start().unwrap_err();
        assert!(matches!(err, SupervisorError::MissingWorkingDir { .. }), "{err:?}");
    }

    #[test]
    fn stop_without_start_is_a_noop() {
        let mut supervisor =
            ServerSupervisor::new(ServerCommand::go_run(std::env::temp_dir()), "http://x");
        supervisor.stop();
        supervisor.stop();
        assert!(!supervisor.is_running());
    }

    #[test]
    fn health_wait_times_out_when_nothing_listens() {
        let url = format!("http://127.0.0.1:{}/health", unused_port());
        let started = Instant::now();
        let mut attempts = 0;
        let ready = poll_health(&url, Duration::from_millis(600), HEALTH_POLL_INTERVAL, |n| {
            attempts = n;
        });
        assert!(!ready);
        assert!(attempts >= 1);
        assert!(started.elapsed() >= Duration::from_millis(600));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[test]
    fn drain_keeps_last_thousand_lines() {
        let mut supervisor = ServerSupervisor::new(
            shell("i=0; while [ $i -lt 1500 ]; do echo \"line $i\"; i=$((i+1)); done"),
            "http://127.0.0.1:1",
        );
        supervisor.start().expect("start");
        let logs = wait_for_last_line(&supervisor, "line 1499");
        assert_eq!(logs.len(), 1000);
        assert_eq!(logs[0], "line 500");
        assert_eq!(logs[999], "line 1499");
        supervisor.stop();
    }

    #[cfg(unix)]
    #[test]
    fn stdout_and_stderr_share_one_buffer() {
        let mut supervisor =
            ServerSupervisor::new(shell("echo out; echo err 1>&2; echo done"), "http://x");
        supervisor.start().expect("start");
        let logs = wait_for_last_line(&supervisor, "done");
        assert!(logs.contains(&"out".to_string()), "{logs:?}");
        assert!(logs.contains(&"err".to_string()), "{logs:?}");
        assert_eq!(supervisor.recent_logs(1), vec!["done".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn second_start_is_rejected_while_running() {
        let mut supervisor = ServerSupervisor::new(shell("sleep 30"), "http://x");
        supervisor.start().expect("start");
        assert!(matches!(supervisor.start(), Err(SupervisorError::AlreadyRunning)));
        supervisor.stop();
    }

    #[cfg(unix)]
    #[test]
    fn start_and_wait_reports_health_timeout() {
        let base = format!("http://127.0.0.1:{}", unused_port());
        let mut supervisor = ServerSupervisor::new(shell("sleep 30"), &base);
        assert_eq!(supervisor.health_url(), format!("{base}/health"));

        let err = supervisor
            .start_and_wait(Duration::from_millis(500))
            .unwrap_err();
        assert!(matches!(err, SupervisorError::HealthTimeout(_)), "{err:?}");
        // Left running for the caller to inspect.
        assert!(supervisor.is_running());
        supervisor.stop();
    }

    #[cfg(unix)]
    #[test]
    fn stop_is_idempotent() {
        let mut supervisor = ServerSupervisor::new(shell("sleep 30 & sleep 30; wait"), "http://x");
        supervisor.start().expect("start");
        assert!(supervisor.is_running());

        supervisor.stop();
        assert!(!supervisor.is_running());
        supervisor.stop();
        assert!(!supervisor.is_running());
        assert!(supervisor.pid().is_none());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn stop_terminates_the_whole_process_group() {
        let mut supervisor = ServerSupervisor::new(shell("sleep 30 & echo $!; wait"), "http://x");
        supervisor.start().expect("start");
        let child = supervisor.pid().expect("pid");
        let grandchild: u32 = wait_for_first_line(&supervisor).parse().expect("pid line");
        assert!(!matches!(process_state(grandchild), None | Some('Z')));

        supervisor.stop();

        assert!(terminated(grandchild), "grandchild {grandchild} survived stop");
        // Reaped by stop, not left as a zombie.
        assert_eq!(process_state(child), None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn stop_kills_a_child_that_ignores_sigterm() {
        let mut supervisor = ServerSupervisor::new(
            shell("trap '' TERM; echo ready; while :; do sleep 1; done"),
            "http://x",
        );
        supervisor.start().expect("start");
        let child = supervisor.pid().expect("pid");
        assert_eq!(wait_for_first_line(&supervisor), "ready");

        let started = Instant::now();
        supervisor.stop();
        let elapsed = started.elapsed();

        assert!(elapsed >= STOP_GRACE_PERIOD, "{elapsed:?}");
        assert!(elapsed < STOP_GRACE_PERIOD + Duration::from_secs(2), "{elapsed:?}");
        assert_eq!(process_state(child), None);
        assert!(!supervisor.is_running());
    }

    #[cfg(unix)]
    #[test]
    fn health_wait_ends_when_the_child_exits() {
        let base = format!("http://127.0.0.1:{}", unused_port());
        let mut supervisor = ServerSupervisor::new(shell("echo 'build failed'; exit 1"), &base);
        supervisor.start().expect("start");

        let started = Instant::now();
        assert!(!supervisor.wait_for_health(DEFAULT_STARTUP_TIMEOUT));
        assert!(started.elapsed() < Duration::from_secs(5), "{:?}", started.elapsed());
        assert!(!supervisor.is_running());
        assert_eq!(wait_for_first_line(&supervisor), "build failed");
    }
}

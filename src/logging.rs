//! Tracing setup and start/complete operation logging.

use std::time::Instant;

/// Install the stderr subscriber used by the binary.
///
/// `RUST_LOG` is honoured; `verbose` raises the default level to debug.
pub fn init(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let result = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: failed to initialise logging: {}", e);
    }
}

/// Logs the start of an operation when created and its completion, with
/// elapsed time, when `complete` is called.
///
/// The emitting component is named explicitly by the caller.
#[derive(Debug)]
pub struct OperationLog {
    component: &'static str,
    operation: &'static str,
    subject: String,
    started: Instant,
}

impl OperationLog {
    pub fn start(
        component: &'static str,
        operation: &'static str,
        subject: impl Into<String>,
    ) -> Self {
        let subject = subject.into();
        tracing::info!(component, operation, subject = %subject, "started");
        Self {
            component,
            operation,
            subject,
            started: Instant::now(),
        }
    }

    pub fn complete(self, summary: &str) {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        tracing::info!(
            component = self.component,
            operation = self.operation,
            subject = %self.subject,
            elapsed_ms,
            "completed: {}",
            summary
        );
    }
}

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Collects the messages of `INFO` events under the `execlog` target
#[derive(Clone, Default)]
pub struct Captured {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Captured {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

struct MessageVisitor(Option<String>);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{:?}", value));
        }
    }
}

impl<S: Subscriber> Layer<S> for Captured {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target() != "execlog" || *metadata.level() != Level::INFO {
            return;
        }

        let mut visitor = MessageVisitor(None);
        event.record(&mut visitor);
        if let Some(message) = visitor.0 {
            self.lines.lock().unwrap().push(message);
        }
    }
}

pub fn capture() -> (Captured, impl Subscriber + Send + Sync + 'static) {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::registry().with(captured.clone());
    (captured, subscriber)
}

/// Split a finish line into the part before the timing and the elapsed millis
pub fn split_timing(line: &str) -> (&str, u64) {
    let (head, time) = line
        .rsplit_once(", time-execution=")
        .expect("finish record carries a timing");
    let millis = time.strip_suffix("ms").expect("timing is in millis");
    (head, millis.parse().unwrap())
}

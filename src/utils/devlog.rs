//! Developer log channel ("level 6").
//!
//! Lines go to the `querylite::dev6` log target at TRACE and, when enabled, to a per-thread
//! capture buffer so tests can assert on them without touching the global logger.

use std::cell::RefCell;

thread_local! {
    static CAPTURE: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Stops capturing on drop.
#[must_use = "capture ends when the guard is dropped"]
pub struct CaptureGuard(());

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        CAPTURE.with(|c| *c.borrow_mut() = None);
    }
}

/// Start capturing dev6 lines emitted on this thread.
pub fn enable_thread_sink() -> CaptureGuard {
    CAPTURE.with(|c| *c.borrow_mut() = Some(Vec::new()));
    CaptureGuard(())
}

#[doc(hidden)]
pub fn write_str(line: &str) {
    CAPTURE.with(|c| {
        if let Some(buf) = c.borrow_mut().as_mut() {
            buf.push(line.to_owned());
        }
    });
}

/// Take captured lines, leaving capture enabled.
pub fn drain() -> Vec<String> {
    CAPTURE.with(|c| c.borrow_mut().as_mut().map(std::mem::take).unwrap_or_default())
}

pub fn snapshot() -> Vec<String> {
    CAPTURE.with(|c| c.borrow().clone().unwrap_or_default())
}

/// Timing or size line for one engine operation: `{"bench":component,"op":op,...}`.
pub fn bench(component: &str, op: &str, fields: &[(&str, u64)]) {
    let mut line = serde_json::Map::new();
    line.insert("bench".into(), component.into());
    line.insert("op".into(), op.into());
    for (k, v) in fields {
        line.insert((*k).into(), (*v).into());
    }
    crate::dev6!("{}", serde_json::Value::Object(line));
}

/// Discrete occurrence such as a codec fallback: `{"event":name,...}`.
pub fn event(name: &str, fields: &[(&str, &str)]) {
    let mut line = serde_json::Map::new();
    line.insert("event".into(), name.into());
    for (k, v) in fields {
        line.insert((*k).into(), (*v).into());
    }
    crate::dev6!("{}", serde_json::Value::Object(line));
}

/// Emit a developer log line.
#[macro_export]
macro_rules! dev6 {
    ($($arg:tt)*) => {{
        let line = format!($($arg)*);
        $crate::utils::devlog::write_str(&line);
        $crate::__log::log!(target: $crate::logger::DEV6_TARGET, $crate::__log::Level::Trace, "{}", line);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_until_guard_drops() {
        {
            let _g = enable_thread_sink();
            crate::dev6!("page {}", 2);
            assert_eq!(snapshot(), vec!["page 2".to_string()]);
            assert_eq!(drain(), vec!["page 2".to_string()]);
            assert!(snapshot().is_empty());
        }
        crate::dev6!("after");
        assert!(drain().is_empty());
    }

    #[test]
    fn typed_lines_are_json_in_insertion_order() {
        let _g = enable_thread_sink();
        bench("cache", "lru_evict", &[("len", 3)]);
        event("codec_fallback", &[("error", "bad \"quote\"")]);
        assert_eq!(
            drain(),
            vec![
                r#"{"bench":"cache","op":"lru_evict","len":3}"#.to_string(),
                r#"{"event":"codec_fallback","error":"bad \"quote\""}"#.to_string(),
            ]
        );
    }

    #[test]
    fn other_threads_are_not_captured() {
        let _g = enable_thread_sink();
        let child = std::thread::spawn(|| {
            crate::dev6!("child");
            snapshot()
        })
        .join()
        .unwrap();
        assert!(child.is_empty());
        assert!(snapshot().is_empty());
    }
}

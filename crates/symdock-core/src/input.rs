//! Pointer events delivered to a session.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => position,
        }
    }
}

/// A recorded pointer sequence, one event per entry.
pub fn parse_script(json: &str) -> Result<Vec<PointerEvent>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = parse_script(
            r#"[{"Down": {"position": {"x": 1.0, "y": 2.0}}},
                {"Move": {"position": {"x": 3.0, "y": 4.0}}},
                {"Up": {"position": {"x": 5.0, "y": 6.0}}}]"#,
        )
        .unwrap();
        assert_eq!(script.len(), 3);
        assert_eq!(script[0], PointerEvent::Down { position: Point::new(1.0, 2.0) });
        assert_eq!(script[2].position(), Point::new(5.0, 6.0));
    }

    #[test]
    fn test_bad_script() {
        assert!(parse_script(r#"[{"Scroll": {}}]"#).is_err());
    }
}

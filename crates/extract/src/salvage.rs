use serde_json::Value;

/// Best-effort recovery of a JSON value from noisy model output.
///
/// Ordered attempts, first success wins:
/// 1. strict parse of the whole input;
/// 2. slice from the first expected opening bracket to the last matching
///    closing bracket, strict-parse the slice;
/// 3. when an array was expected and step 2 failed, retry the slice with
///    `{`/`}` (some models wrap the list in an object).
///
/// `None` is an expected, frequent outcome given model unreliability, not
/// an error path. The first-open/last-close slice is deliberately not a
/// minimal balanced match: it tolerates stray text around one structure at
/// the cost of being wrong when the output contains several independent
/// structures.
pub fn salvage_json(raw: &str, expect_array: bool) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        return Some(value);
    }
    let (open, close) = if expect_array { ('[', ']') } else { ('{', '}') };
    if let Some(value) = parse_slice(raw, open, close) {
        return Some(value);
    }
    if expect_array {
        if let Some(value) = parse_slice(raw, '{', '}') {
            return Some(value);
        }
    }
    None
}

fn parse_slice(raw: &str, open: char, close: char) -> Option<Value> {
    let start = raw.find(open)?;
    let end = raw.rfind(close)?;
    if end < start {
        return None;
    }
    serde_json::from_str(&raw[start..=end]).ok()
}

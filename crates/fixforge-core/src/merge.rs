use crate::value::{Fields, Value};

/// Deep-merge overlay fields into the target.
///
/// Every field present in the overlay is assigned; where both sides hold
/// a structured object the merge recurses instead of replacing, so
/// target fields the overlay does not mention survive at every depth.
pub fn merge_fields(target: &mut Fields, overlay: &Fields) {
    for (key, value) in overlay.iter() {
        if let Value::Object(incoming) = value {
            if let Some(Value::Object(existing)) = target.get_mut(key) {
                merge_fields(existing, incoming);
                continue;
            }
        }

        target.insert(key, value.clone());
    }
}

/// Assign a value at a dot-separated field path, creating intermediate
/// objects as needed. A non-object value on the path is replaced.
pub fn set_path(target: &mut Fields, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    set_segments(target, &segments, value);
}

/// Assign a value at an already-split field path.
pub fn set_segments(target: &mut Fields, segments: &[&str], value: Value) {
    match segments {
        [] => {}
        [leaf] => {
            target.insert(*leaf, value);
        }
        [head, rest @ ..] => set_segments(target.object_mut(head), rest, value),
    }
}

//! Recursive deep merge of partial updates into fetched documents.
//!
//! eBay's inventory PUT endpoints replace the whole resource, so a partial
//! update has to be folded into the current remote document before sending.
//! For every key in the overlay:
//!
//! 1. key missing from the base: the overlay value is copied in
//! 2. both values are objects: merge recursively
//! 3. values are deeply equal: nothing to do
//! 4. both values are arrays: merge element-wise by index
//! 5. anything else: the overlay wins, or, under [`MergePolicy::Strict`], the
//!    merge fails with [`SyncError::MergeConflict`] naming the dotted path
//!
//! Array merging is positional, not keyed. Two arrays holding the same set in
//! different orders merge into nonsense:
//!
//! ```rust
//! use shopify_ebay_sync::document::merge;
//! use serde_json::json;
//!
//! let mut base = json!({"tags": ["a", "b"]});
//! merge(&mut base, &json!({"tags": ["c"]})).unwrap();
//! assert_eq!(base, json!({"tags": ["c", "b"]}));
//! ```
//!
//! Overlay elements past the end of the base array are appended.

use serde_json::Value;

use crate::error::SyncError;

/// Path rendered for a conflict on the document root itself.
pub const ROOT_PATH: &str = "<root>";

/// What to do when two different leaf values meet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// The overlay value replaces the base value.
    #[default]
    Overwrite,
    /// Differing leaves are an error.
    Strict,
}

/// Merges `overlay` into `base` in place, letting the overlay win.
///
/// Returns `base` for chaining. Clone `base` first if the pre-merge document
/// is still needed.
///
/// # Errors
///
/// Never fails under the default policy; the `Result` matches
/// [`merge_with`].
pub fn merge<'a>(base: &'a mut Value, overlay: &Value) -> Result<&'a mut Value, SyncError> {
    merge_with(base, overlay, MergePolicy::Overwrite)
}

/// Merges `overlay` into `base` in place under `policy`.
///
/// # Errors
///
/// Returns [`SyncError::MergeConflict`] under [`MergePolicy::Strict`] when a
/// leaf differs. `base` may be partially merged when that happens.
///
/// ```rust
/// use shopify_ebay_sync::document::{merge_with, MergePolicy};
/// use shopify_ebay_sync::SyncError;
/// use serde_json::json;
///
/// let mut base = json!({"x": 1});
/// let err = merge_with(&mut base, &json!({"x": 2}), MergePolicy::Strict).unwrap_err();
/// assert!(matches!(err, SyncError::MergeConflict { path } if path == "x"));
/// ```
pub fn merge_with<'a>(
    base: &'a mut Value,
    overlay: &Value,
    policy: MergePolicy,
) -> Result<&'a mut Value, SyncError> {
    let mut path = Vec::new();
    merge_node(base, overlay, policy, &mut path)?;
    Ok(base)
}

/// Returns a merged copy of `base` with `overlay` applied, overlay winning.
///
/// # Errors
///
/// Never fails; the `Result` matches [`merge`].
pub fn merged(base: &Value, overlay: &Value) -> Result<Value, SyncError> {
    let mut result = base.clone();
    merge(&mut result, overlay)?;
    Ok(result)
}

fn merge_node(
    base: &mut Value,
    overlay: &Value,
    policy: MergePolicy,
    path: &mut Vec<String>,
) -> Result<(), SyncError> {
    if let (Value::Object(base_map), Value::Object(overlay_map)) = (&mut *base, overlay) {
        for (key, overlay_value) in overlay_map {
            path.push(key.clone());
            match base_map.get_mut(key) {
                Some(base_value) => merge_node(base_value, overlay_value, policy, path)?,
                None => {
                    base_map.insert(key.clone(), overlay_value.clone());
                }
            }
            path.pop();
        }
        return Ok(());
    }

    if *base == *overlay {
        return Ok(());
    }

    if let (Value::Array(base_items), Value::Array(overlay_items)) = (&mut *base, overlay) {
        for (index, overlay_item) in overlay_items.iter().enumerate() {
            path.push(index.to_string());
            match base_items.get_mut(index) {
                Some(base_item) => merge_node(base_item, overlay_item, policy, path)?,
                None => base_items.push(overlay_item.clone()),
            }
            path.pop();
        }
        return Ok(());
    }

    match policy {
        MergePolicy::Overwrite => {
            *base = overlay.clone();
            Ok(())
        }
        MergePolicy::Strict => Err(SyncError::MergeConflict {
            path: render_path(path),
        }),
    }
}

fn render_path(path: &[String]) -> String {
    if path.is_empty() {
        ROOT_PATH.to_string()
    } else {
        path.join(".")
    }
}

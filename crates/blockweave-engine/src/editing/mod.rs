/*!
 * # Editing Core Module
 *
 * Turns text edits into an updated block list and an ordered stream of
 * structural notifications.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: xi-rope Buffer
 * - The text lives in a `TextBuffer` backed by an `xi_rope::Rope`
 * - An edit builds the next revision from a `Delta`; the previous revision
 *   stays in place until the whole edit has succeeded
 *
 * ### 2. Incremental Reparse
 * - `invalidation` maps an edit to the whole lines it destroyed, once in
 *   pre-edit coordinates (`replaced`) and once in post-edit coordinates
 *   (`reparse`)
 * - Only `reparse` is handed to the grammar
 *
 * ### 3. Reconciliation
 * - `reconcile` splices the parsed blocks over the replaced ones, matching
 *   positionally, and shifts every later block by the edit's length delta
 * - Each step is recorded as a `Notification` whose index is valid against
 *   the list as mutated by the notifications before it
 *
 * ### 4. Observers
 * - A `DocumentObserver` is passed to each edit and receives
 *   `will_update`, the notifications, then `did_finish_update`
 * - Observers never hold a reference to the document, so they cannot
 *   re-enter it mid-edit
 *
 * ## Module Structure
 *
 * - **`document`**: `Document`, the orchestrator, and `ReparseSettings`
 * - **`invalidation`**: `Invalidation` and `compute_invalidation`
 * - **`reconcile`**: `reconcile` and `replaced_blocks`
 * - **`notification`**: `Notification`, `DocumentObserver`, `NullObserver`
 * - **`patch`**: summary of a committed edit
 */

pub mod document;
pub mod invalidation;
pub mod notification;
pub mod patch;
pub mod reconcile;

pub use document::{Document, DocumentError, ReparseSettings};
pub use invalidation::{Invalidation, compute_invalidation};
pub use notification::{ApplyError, DocumentObserver, Notification, NullObserver};
pub use patch::Patch;
pub use reconcile::{ReconcileError, Reconciliation, reconcile, replaced_blocks};

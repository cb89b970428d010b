pub(crate) struct PendingSelection {
  pub(crate) request_id: u64,
  pub(crate) user_id: String,
}

//! Loading flag handling shared by the fetching containers.

use tokio::sync::watch;

/// Raises a loading flag on creation and lowers it when dropped.
///
/// Dropping covers success, failure and a caller abandoning the future
/// mid-request, so the flag can never stay raised once a request has settled.
pub(crate) struct LoadingGuard<'a, T> {
    state: &'a watch::Sender<T>,
    finish: fn(&mut T),
}

impl<'a, T> LoadingGuard<'a, T> {
    pub(crate) fn begin(state: &'a watch::Sender<T>, begin: fn(&mut T), finish: fn(&mut T)) -> Self {
        state.send_modify(begin);
        Self { state, finish }
    }
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        self.state.send_modify(self.finish);
    }
}

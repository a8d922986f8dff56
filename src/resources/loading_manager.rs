//! Aggregate progress tracking for concurrent asset loads.
//!
//! Every loader created with the same [`LoadingManager`] reports each file it
//! fetches as one item. The manager counts items across all of them and calls
//! back when the first item of a batch starts, after every finished item, when
//! all registered items are done, and for each failure. A failed item still
//! counts as finished so that `on_load` fires once the batch has settled.
//!
//! Callbacks run outside the lock, one at a time, in the order the counters
//! changed. Whichever thread finds nobody dispatching drains the queue, so a
//! call from another thread may return before its callbacks have run. A
//! callback may register or finish items itself; those notifications are
//! delivered after it returns.

use std::{
    collections::VecDeque,
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};

type ItemCallback = Box<dyn Fn(&str, usize, usize) + Send + Sync>;
type LoadCallback = Box<dyn Fn() + Send + Sync>;
type ErrorCallback = Box<dyn Fn(&str) + Send + Sync>;
type UrlModifier = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Snapshot of a manager's counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: usize,
    pub total: usize,
    pub failed: usize,
    pub is_loading: bool,
}

impl LoadProgress {
    /// Share of registered items that have finished, `1.0` when nothing was registered.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.loaded as f32 / self.total as f32
        }
    }
}

#[derive(Debug)]
enum Notification {
    Start { url: String, loaded: usize, total: usize },
    Progress { url: String, loaded: usize, total: usize },
    Load,
    Error { url: String },
}

#[derive(Default)]
struct State {
    progress: LoadProgress,
    queue: VecDeque<Notification>,
    dispatching: bool,
}

/// Hands dispatching back if a callback panics.
struct DispatchGuard<'a>(&'a LoadingManager);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.lock().dispatching = false;
        }
    }
}

#[derive(Default)]
pub struct LoadingManager {
    state: Mutex<State>,
    on_start: Option<ItemCallback>,
    on_progress: Option<ItemCallback>,
    on_load: Option<LoadCallback>,
    on_error: Option<ErrorCallback>,
    url_modifier: Option<UrlModifier>,
}

impl fmt::Debug for LoadingManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingManager")
            .field("progress", &self.progress())
            .field("has_url_modifier", &self.url_modifier.is_some())
            .finish_non_exhaustive()
    }
}

impl LoadingManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager that reports every stage of loading to the log.
    pub fn logging() -> Self {
        Self::new()
            .on_start(|url, loaded, total| {
                log::info!("loading started: {url} ({loaded}/{total})");
            })
            .on_progress(|url, loaded, total| {
                log::info!("loading: {url} ({loaded}/{total})");
            })
            .on_load(|| log::info!("loading completed"))
            .on_error(|url| log::error!("loading failed: {url}"))
    }

    /// Called with `(url, loaded, total)` when an item starts while nothing else is loading.
    pub fn on_start(mut self, callback: impl Fn(&str, usize, usize) + Send + Sync + 'static) -> Self {
        self.on_start = Some(Box::new(callback));
        self
    }

    /// Called with `(url, loaded, total)` every time an item finishes, successfully or not.
    pub fn on_progress(mut self, callback: impl Fn(&str, usize, usize) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Called when every registered item has finished.
    pub fn on_load(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_load = Some(Box::new(callback));
        self
    }

    /// Called with the url of every item that failed.
    pub fn on_error(mut self, callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Rewrite every url before it is fetched, e.g. to point at a CDN.
    pub fn with_url_modifier(mut self, modifier: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.url_modifier = Some(Box::new(modifier));
        self
    }

    pub fn resolve_url(&self, url: &str) -> String {
        match &self.url_modifier {
            Some(modifier) => modifier(url),
            None => url.to_string(),
        }
    }

    pub fn progress(&self) -> LoadProgress {
        self.lock().progress
    }

    pub fn is_loading(&self) -> bool {
        self.lock().progress.is_loading
    }

    pub fn item_start(&self, url: &str) {
        {
            let mut state = self.lock();
            let progress = &mut state.progress;
            progress.total += 1;
            let first = !progress.is_loading;
            progress.is_loading = true;
            let (loaded, total) = (progress.loaded, progress.total);
            if first {
                state.queue.push_back(Notification::Start {
                    url: url.to_string(),
                    loaded,
                    total,
                });
            }
        }
        log::debug!("item started: {url}");
        self.dispatch();
    }

    pub fn item_end(&self, url: &str) {
        {
            let mut state = self.lock();
            let progress = &mut state.progress;
            progress.loaded += 1;
            let done = progress.loaded == progress.total;
            if done {
                progress.is_loading = false;
            }
            let (loaded, total) = (progress.loaded, progress.total);
            log::debug!("item finished: {url} ({loaded}/{total})");
            state.queue.push_back(Notification::Progress {
                url: url.to_string(),
                loaded,
                total,
            });
            if done {
                log::debug!("all {total} items finished");
                state.queue.push_back(Notification::Load);
            }
        }
        self.dispatch();
    }

    pub fn item_error(&self, url: &str) {
        {
            let mut state = self.lock();
            state.progress.failed += 1;
            state.queue.push_back(Notification::Error { url: url.to_string() });
        }
        log::debug!("item failed: {url}");
        self.dispatch();
    }

    /// Deliver queued notifications unless another call is already doing so.
    fn dispatch(&self) {
        {
            let mut state = self.lock();
            if state.dispatching {
                return;
            }
            state.dispatching = true;
        }
        let _guard = DispatchGuard(self);
        loop {
            let next = {
                let mut state = self.lock();
                match state.queue.pop_front() {
                    Some(next) => next,
                    None => {
                        state.dispatching = false;
                        return;
                    }
                }
            };
            self.notify(next);
        }
    }

    fn notify(&self, notification: Notification) {
        match notification {
            Notification::Start { url, loaded, total } => {
                if let Some(on_start) = &self.on_start {
                    on_start(&url, loaded, total);
                }
            }
            Notification::Progress { url, loaded, total } => {
                if let Some(on_progress) = &self.on_progress {
                    on_progress(&url, loaded, total);
                }
            }
            Notification::Load => {
                if let Some(on_load) = &self.on_load {
                    on_load();
                }
            }
            Notification::Error { url } => {
                if let Some(on_error) = &self.on_error {
                    on_error(&url);
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

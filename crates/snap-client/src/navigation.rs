//! Session-driven navigation.
//!
//! ```text
//! Initializing ──first session callback──▶ Unauthenticated ⇄ Authenticated(identity)
//!                                    └───▶ Authenticated(identity)
//! ```
//!
//! [`NavState::next`] is the pure transition function. [`Navigator`] adds the
//! route stack of the mounted graph, and [`NavigationGate`] wires a navigator
//! to the session store.

use std::sync::Arc;

use parking_lot::Mutex;
use snap_auth::{SessionReader, Subscription};
use snap_core::{Identity, PostId};
use tokio::sync::watch;

use crate::error::NavError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavState {
    #[default]
    Initializing,
    Unauthenticated,
    Authenticated(Identity),
}

/// The screen graph mounted for a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Graph {
    /// Loading affordance only.
    Loading,
    /// Sign-in and sign-up.
    Auth,
    /// Feed, composer, profile, and post detail.
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SignIn,
    SignUp,
    Feed,
    Compose,
    Profile,
    PostDetail(PostId),
}

impl Route {
    #[must_use]
    pub const fn graph(self) -> Graph {
        match self {
            Self::SignIn | Self::SignUp => Graph::Auth,
            Self::Feed | Self::Compose | Self::Profile | Self::PostDetail(_) => Graph::Content,
        }
    }

    /// Tab and auth routes replace the stack; detail routes push onto it.
    const fn is_root(self) -> bool {
        !matches!(self, Self::PostDetail(_))
    }
}

impl NavState {
    /// State after a session callback carrying `identity`. Any state accepts
    /// any callback; there is no terminal state.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn next(&self, identity: Option<&Identity>) -> Self {
        identity.map_or(Self::Unauthenticated, |identity| {
            Self::Authenticated(identity.clone())
        })
    }

    #[must_use]
    pub const fn graph(&self) -> Graph {
        match self {
            Self::Initializing => Graph::Loading,
            Self::Unauthenticated => Graph::Auth,
            Self::Authenticated(_) => Graph::Content,
        }
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Initializing | Self::Unauthenticated => None,
        }
    }

    const fn root(&self) -> Option<Route> {
        match self {
            Self::Initializing => None,
            Self::Unauthenticated => Some(Route::SignIn),
            Self::Authenticated(_) => Some(Route::Feed),
        }
    }
}

/// Navigation state plus the route stack of the mounted graph.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: NavState,
    stack: Vec<Route>,
}

impl Navigator {
    #[must_use]
    pub const fn state(&self) -> &NavState {
        &self.state
    }

    #[must_use]
    pub fn stack(&self) -> &[Route] {
        &self.stack
    }

    #[must_use]
    pub fn current(&self) -> Option<Route> {
        self.stack.last().copied()
    }

    /// Apply a session callback. Returns whether the mounted graph was rebuilt.
    ///
    /// Any change of state (including a different identity in the content
    /// graph) remounts from the root; nothing of the previous graph survives.
    pub fn apply(&mut self, identity: Option<&Identity>) -> bool {
        let next = self.state.next(identity);
        if next == self.state {
            return false;
        }
        self.stack = next.root().into_iter().collect();
        self.state = next;
        true
    }

    /// # Errors
    ///
    /// [`NavError::NotReady`] while initializing, [`NavError::NotMounted`] for
    /// a route outside the mounted graph.
    pub fn navigate(&mut self, route: Route) -> Result<(), NavError> {
        match self.state.graph() {
            Graph::Loading => return Err(NavError::NotReady),
            graph if graph != route.graph() => return Err(NavError::NotMounted(route)),
            _ => {}
        }
        if route.is_root() {
            self.stack.clear();
        } else if self.current() == Some(route) {
            return Ok(());
        }
        self.stack.push(route);
        Ok(())
    }

    /// Pop the top route, never the graph root.
    pub fn back(&mut self) -> Option<Route> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Drop any detail view of `id` (after the post was deleted).
    pub fn leave_detail(&mut self, id: PostId) {
        self.stack.retain(|route| *route != Route::PostDetail(id));
        if self.stack.is_empty()
            && let Some(root) = self.state.root()
        {
            self.stack.push(root);
        }
    }
}

/// A [`Navigator`] driven by session callbacks.
///
/// The gate's state changes only through the session subscription; screens
/// can move between routes of the mounted graph but never switch graphs.
pub struct NavigationGate {
    navigator: Arc<Mutex<Navigator>>,
    changes: watch::Receiver<NavState>,
    _subscription: Subscription,
}

impl NavigationGate {
    /// Subscribe a new gate to `session`.
    #[must_use]
    pub fn attach(session: &SessionReader) -> Self {
        let navigator = Arc::new(Mutex::new(Navigator::default()));
        let (tx, changes) = watch::channel(NavState::Initializing);

        let target = Arc::clone(&navigator);
        let subscription = session.subscribe(move |identity| {
            let mut nav = target.lock();
            if nav.apply(identity) {
                tracing::debug!(graph = ?nav.state().graph(), "screen graph remounted");
                tx.send_replace(nav.state().clone());
            }
        });

        Self {
            navigator,
            changes,
            _subscription: subscription,
        }
    }

    #[must_use]
    pub fn state(&self) -> NavState {
        self.navigator.lock().state().clone()
    }

    #[must_use]
    pub fn graph(&self) -> Graph {
        self.navigator.lock().state().graph()
    }

    #[must_use]
    pub fn current(&self) -> Option<Route> {
        self.navigator.lock().current()
    }

    #[must_use]
    pub fn stack(&self) -> Vec<Route> {
        self.navigator.lock().stack().to_vec()
    }

    /// Receiver notified on every remount.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<NavState> {
        self.changes.clone()
    }

    /// # Errors
    ///
    /// See [`Navigator::navigate`].
    pub fn navigate(&self, route: Route) -> Result<(), NavError> {
        self.navigator.lock().navigate(route)
    }

    pub fn back(&self) -> Option<Route> {
        self.navigator.lock().back()
    }

    pub fn leave_detail(&self, id: PostId) {
        self.navigator.lock().leave_detail(id);
    }
}

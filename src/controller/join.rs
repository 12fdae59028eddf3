//! Fan-in join nodes.
//!
//! A join node keeps one slot per input holding the latest value seen on it.
//! Whenever any input changes, the slot is refreshed and the pure `combine`
//! function runs over all slots; a `Some` result is published. Inputs may update
//! in any interleaving; a closed input keeps its last value.

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::scope::ScreenScope;
use crate::view::ViewStatePublisher;

/// Latest value of one join input
struct Slot<T> {
    rx: watch::Receiver<T>,
    value: T,
    open: bool,
}

impl<T: Clone> Slot<T> {
    fn new(mut rx: watch::Receiver<T>) -> Self {
        let value = rx.borrow_and_update().clone();
        Self {
            rx,
            value,
            open: true,
        }
    }

    fn value(&self) -> &T {
        &self.value
    }

    fn is_open(&self) -> bool {
        self.open
    }

    /// Wait for the input to change. Returns `false` when the input closed.
    async fn changed(&mut self) -> bool {
        match self.rx.changed().await {
            Ok(()) => {
                self.value = self.rx.borrow_and_update().clone();
                true
            }
            Err(_) => {
                self.open = false;
                false
            }
        }
    }
}

macro_rules! define_join {
    ($(#[$doc:meta])* $name:ident, $($ty:ident => $slot:ident),+) => {
        $(#[$doc])*
        pub fn $name<$($ty,)+ O, F>(
            scope: &ScreenScope,
            $($slot: watch::Receiver<$ty>,)+
            out: ViewStatePublisher<O>,
            combine: F,
        ) -> JoinHandle<()>
        where
            $($ty: Clone + Send + Sync + 'static,)+
            O: Send + Sync + 'static,
            F: Fn($(&$ty),+) -> Option<O> + Send + 'static,
        {
            let name = scope.name();
            scope.spawn(async move {
                $(let mut $slot = Slot::new($slot);)+
                let mut dirty = true;
                loop {
                    if dirty {
                        if let Some(value) = combine($($slot.value()),+) {
                            out.publish(value);
                        }
                    }
                    tokio::select! {
                        $(changed = $slot.changed(), if $slot.is_open() => dirty = changed,)+
                        else => break,
                    }
                }
                tracing::debug!(scope = name, "All join inputs closed");
            })
        }
    };
}

define_join!(
    /// Join node over two inputs.
    join2, A => a, B => b
);

define_join!(
    /// Join node over three inputs.
    join3, A => a, B => b, C => c
);

define_join!(
    /// Join node over four inputs.
    join4, A => a, B => b, C => c, D => d
);

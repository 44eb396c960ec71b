pub(crate) mod clock;
pub(crate) mod debounce;
pub(crate) mod event_loop;
pub(crate) mod sketch;
pub(crate) mod state;

pub mod default_event_bus;

pub use default_event_bus::DefaultEventBus;

//! End-to-end tests driving the headless app through the action queue,
//! mirroring how the console binary exercises the engine.

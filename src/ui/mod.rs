// UI module - Slint window and event loop bridge
//
// This module contains:
// - EventLoopBridge: Marshals form state updates from other threads onto the Slint event loop
// - GuiController: Wires the password window to the FormManager

pub mod bridge;
pub mod controller;

pub use bridge::{EventLoopBridge, EventLoopBridgeHandle};
pub use controller::GuiController;

//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an entity becoming due (a payment deadline).
#[derive(Clone, Copy, Debug)]
pub struct Due;

/// Marker type describing a scheduled moment (an appointment or a slot).
#[derive(Clone, Copy, Debug)]
pub struct Schedule;

/// Marker type describing a payment being made.
#[derive(Clone, Copy, Debug)]
pub struct Payment;

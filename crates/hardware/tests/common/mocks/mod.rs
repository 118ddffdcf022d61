//! Mock implementations of device traits.

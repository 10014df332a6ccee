// File: src/private.rs
// Purpose: Capability probes used by code generated from #[derive(Record)]
//
// Each probe is called as `(&&Probe(&field)).probe_*()`. Method resolution picks the
// impl on `&Probe<T>` when `T` has the capability and falls back to the impl on
// `Probe<T>` otherwise, so the derive never needs to know the field's type.

use std::any::Any;

use crate::record::{MapValue, Record, SelfValidate};
use crate::value::Value;

pub struct Probe<'a, T>(pub &'a T);

pub trait ViaRecord<'a> {
    fn probe_value(&self) -> Value<'a>;
}

impl<'a, T: Record> ViaRecord<'a> for &Probe<'a, T> {
    fn probe_value(&self) -> Value<'a> {
        Value::record(self.0)
    }
}

pub trait ViaAny<'a> {
    fn probe_value(&self) -> Value<'a>;
}

impl<'a, T: Any> ViaAny<'a> for Probe<'a, T> {
    fn probe_value(&self) -> Value<'a> {
        Value::new(self.0)
    }
}

pub trait ViaSelfValidate<'a> {
    fn probe_self_validate(&self) -> Option<&'a dyn SelfValidate>;
}

impl<'a, T: SelfValidate> ViaSelfValidate<'a> for &Probe<'a, T> {
    fn probe_self_validate(&self) -> Option<&'a dyn SelfValidate> {
        Some(self.0)
    }
}

pub trait NoSelfValidate<'a> {
    fn probe_self_validate(&self) -> Option<&'a dyn SelfValidate>;
}

impl<'a, T> NoSelfValidate<'a> for Probe<'a, T> {
    fn probe_self_validate(&self) -> Option<&'a dyn SelfValidate> {
        None
    }
}

pub trait ViaMapValue<'a> {
    fn probe_map_value(&self) -> Option<&'a dyn MapValue>;
}

impl<'a, T: MapValue> ViaMapValue<'a> for &Probe<'a, T> {
    fn probe_map_value(&self) -> Option<&'a dyn MapValue> {
        Some(self.0)
    }
}

pub trait NoMapValue<'a> {
    fn probe_map_value(&self) -> Option<&'a dyn MapValue>;
}

impl<'a, T> NoMapValue<'a> for Probe<'a, T> {
    fn probe_map_value(&self) -> Option<&'a dyn MapValue> {
        None
    }
}

pub trait ViaOption {
    fn probe_null(&self) -> bool;
}

impl<'a, T> ViaOption for &Probe<'a, Option<T>> {
    fn probe_null(&self) -> bool {
        self.0.is_none()
    }
}

pub trait NoOption {
    fn probe_null(&self) -> bool;
}

impl<'a, T> NoOption for Probe<'a, T> {
    fn probe_null(&self) -> bool {
        false
    }
}

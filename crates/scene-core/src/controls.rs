//! Control panel binding layer.
//!
//! The panel widget library is reached through [`ControlPanel`]. Binding a
//! parameter registers a widget seeded with the parameter's current value
//! and records which parameter the returned [`ControlHandle`] drives. When
//! the host reports widget input, [`ControlBindings::resolve`] maps it back
//! to a parameter and a clamped value ready for `ParameterStore::set`.

use crate::color::Color;
use crate::error::ParamError;
use crate::params::{ParamId, ParamKind, ParamValue, ParameterStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControlHandle(usize);

impl ControlHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FolderId(pub usize);

/// Slider range; `step` of zero disables snapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Bounds {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self { min, max, step }
    }

    /// Clamp into `[min, max]` and snap to the step grid anchored at `min`.
    ///
    /// Values already on the grid come back bit-for-bit unchanged; snapped
    /// values are rounded to the step's decimal precision in `f64`, so a
    /// step of `0.01` yields `0.81` rather than a neighbouring float.
    pub fn apply(&self, v: f32) -> f32 {
        let clamped = v.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let step = self.step as f64;
        let min = self.min as f64;
        let steps = (clamped as f64 - min) / step;
        let nearest = steps.round();
        if (steps - nearest).abs() < GRID_EPSILON {
            return clamped;
        }
        let scale = 10f64.powi(step_decimals(step));
        let snapped = ((min + nearest * step) * scale).round() / scale;
        (snapped as f32).clamp(self.min, self.max)
    }
}

// Fraction of a step within which a value counts as already on the grid.
const GRID_EPSILON: f64 = 1e-4;

// Decimal places needed to print `step` exactly, e.g. 2 for 0.01.
fn step_decimals(step: f64) -> i32 {
    let mut decimals = 0;
    let mut scaled = step;
    while decimals < 9 && (scaled - scaled.round()).abs() > 1e-6 * scaled.max(1.0) {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

/// Raw value reported by a widget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlInput {
    Number(f32),
    Color(Color),
}

/// Widget description handed to the panel.
#[derive(Clone, Debug, PartialEq)]
pub enum Widget {
    Slider { initial: f32, bounds: Option<Bounds> },
    ColorSwatch { initial: Color },
}

/// External panel surface. Implementations render widgets and later report
/// user edits for `handle` back to the owner of the bindings.
pub trait ControlPanel {
    fn add_folder(&mut self, name: &str, open: bool) -> FolderId;
    fn add_widget(
        &mut self,
        folder: Option<FolderId>,
        label: &str,
        widget: Widget,
        handle: ControlHandle,
    );
}

#[derive(Clone, Debug)]
struct Binding {
    param: ParamId,
    bounds: Option<Bounds>,
}

#[derive(Debug, Default)]
pub struct ControlBindings {
    bindings: Vec<Binding>,
}

impl ControlBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a widget for `param` seeded with its current value.
    ///
    /// `bounds` only applies to numeric parameters; color swatches carry no
    /// range.
    pub fn bind(
        &mut self,
        panel: &mut dyn ControlPanel,
        store: &ParameterStore,
        param: ParamId,
        folder: Option<FolderId>,
        label: &str,
        bounds: Option<Bounds>,
    ) -> Result<ControlHandle, ParamError> {
        let current = store
            .get(param)
            .ok_or(ParamError::UnknownParameter(param.index()))?;
        let (widget, bounds) = match current {
            ParamValue::Number(initial) => (Widget::Slider { initial, bounds }, bounds),
            ParamValue::Color(initial) => (Widget::ColorSwatch { initial }, None),
        };
        let handle = ControlHandle(self.bindings.len());
        self.bindings.push(Binding { param, bounds });
        panel.add_widget(folder, label, widget, handle);
        Ok(handle)
    }

    /// Map widget input to the bound parameter and its well-formed value.
    pub fn resolve(
        &self,
        store: &ParameterStore,
        handle: ControlHandle,
        input: ControlInput,
    ) -> Result<(ParamId, ParamValue), ParamError> {
        let binding = self
            .bindings
            .get(handle.0)
            .ok_or(ParamError::UnknownControl(handle.0))?;
        let param = store
            .param(binding.param)
            .ok_or(ParamError::UnknownParameter(binding.param.index()))?;
        let value = match (input, param.kind()) {
            (ControlInput::Number(v), ParamKind::Number) => {
                let v = binding.bounds.map_or(v, |b| b.apply(v));
                ParamValue::Number(v)
            }
            (ControlInput::Color(c), ParamKind::Color) => ParamValue::Color(c),
            (_, expected) => {
                return Err(ParamError::KindMismatch {
                    name: param.name.clone(),
                    expected,
                })
            }
        };
        Ok((binding.param, value))
    }

    pub fn param_for(&self, handle: ControlHandle) -> Option<ParamId> {
        self.bindings.get(handle.0).map(|b| b.param)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

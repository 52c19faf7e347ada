//! # Harmonizer
//!
//! The harmonizer adds a selectable musical interval to an incoming 1volt/octave pitch signal, so that a second voice
//! can play a fixed interval above or below the first.
//!
//! The interval is picked with a bank of switches, one for each of the half-step, whole-step, minor third, major
//! third, fifth and octave. Every enabled interval is added together, and an up/down switch picks whether the total is
//! added above or below the input. For example enabling the fifth and the octave with the switch set to down plays a
//! twelfth below the input.
//!
//! Flipping a switch does not step the output to the new interval. The offset is passed through a glissando controller
//! so the harmonized voice slides into the new interval instead of clicking.
//!
//! # Inputs
//!
//! * A pitch signal in 1volt/octave scaling
//!
//! # Outputs
//!
//! * The unmodified input, echoed back
//!
//! * The input shifted by the gliding interval offset
//!
//! * Panel indicator states, see [`Indicators`]

use crate::glissando::GlissandoController;
use heapless::Vec;

/// The number of selectable scale degrees
pub const NUM_SCALE_DEGREES: usize = 6;

/// Each octave spans 1 volt, so each semitone spans 1/12 of a volt
pub const SEMITONES_PER_OCTAVE: f32 = 12.0_f32;

/// The intervals that can be enabled on the harmonizer are represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleDegree {
    HalfStep,
    WholeStep,
    MinorThird,
    MajorThird,
    Fifth,
    Octave,
}

impl ScaleDegree {
    /// Every scale degree, in the order they appear on the panel
    pub const ALL: [ScaleDegree; NUM_SCALE_DEGREES] = [
        ScaleDegree::HalfStep,
        ScaleDegree::WholeStep,
        ScaleDegree::MinorThird,
        ScaleDegree::MajorThird,
        ScaleDegree::Fifth,
        ScaleDegree::Octave,
    ];

    /// `d.semitones()` is the size of interval `d` in semitones
    pub const fn semitones(self) -> u8 {
        match self {
            ScaleDegree::HalfStep => 1,
            ScaleDegree::WholeStep => 2,
            ScaleDegree::MinorThird => 3,
            ScaleDegree::MajorThird => 4,
            ScaleDegree::Fifth => 7,
            ScaleDegree::Octave => 12,
        }
    }

    /// `d.position()` is where `d` sits in `ScaleDegree::ALL`
    pub const fn position(self) -> usize {
        self as usize
    }

    // the bit representing this degree in the enabled bitfield
    const fn bit(self) -> u8 {
        1 << self.position()
    }
}

/// Whether the interval is added above or below the input is represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// `Direction::from_switch(v)` is `Up` iff the switch value `v` is greater than zero, `Down` otherwise
    pub fn from_switch(v: f32) -> Self {
        if 0.0_f32 < v {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// `dir.sign()` is `1.0` for `Up` and `-1.0` for `Down`
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => 1.0_f32,
            Direction::Down => -1.0_f32,
        }
    }
}

/// One sample of harmonizer output is represented here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonizerOutput {
    /// The input, passed through untouched
    pub echo: f32,
    /// The input plus the current interval offset
    pub shifted: f32,
}

/// The state of the harmonizer panel lights is represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicators {
    /// Lit when the direction is up
    pub up: bool,
    /// Lit when the direction is down
    pub down: bool,
    /// One light per scale degree in `ScaleDegree::ALL` order, lit when the degree is enabled
    pub degrees: [bool; NUM_SCALE_DEGREES],
    /// Tens digit of the total interval in semitones, regardless of direction
    pub tens: u8,
    /// Ones digit of the total interval in semitones, regardless of direction
    pub ones: u8,
}

impl Indicators {
    /// `ind.degree(d)` is true iff the light for scale degree `d` is lit
    pub fn degree(&self, degree: ScaleDegree) -> bool {
        self.degrees[degree.position()]
    }
}

/// A harmonizer which shifts its input by a gliding interval is represented here.
pub struct Harmonizer {
    glissando: GlissandoController,

    // enabled degrees are represented as an integer bitfield
    // the 6 lowest bits represent the degrees in `ScaleDegree::ALL` order, a set-bit means enabled
    enabled: u8,

    direction: Direction,
}

impl Default for Harmonizer {
    /// `Harmonizer::default()` is a new harmonizer with no intervals enabled, pointing up, with the default glide
    fn default() -> Self {
        Self::new(GlissandoController::default())
    }
}

impl Harmonizer {
    /// `Harmonizer::new(g)` is a new harmonizer with no intervals enabled, pointing up, which glides with `g`
    pub fn new(glissando: GlissandoController) -> Self {
        Self {
            glissando,
            enabled: 0,
            direction: Direction::Up,
        }
    }

    /// `h.tick(v)` is the harmonizer output for input sample `v`, must be called once per sample
    ///
    /// # Examples
    ///
    /// ```
    /// use bacon_modules::glissando::GlissandoController;
    /// use bacon_modules::harmonizer::{Harmonizer, ScaleDegree};
    ///
    /// let mut h = Harmonizer::new(GlissandoController::new(2));
    /// h.enable(&[ScaleDegree::Octave]);
    ///
    /// // an octave up glides in over two samples
    /// assert_eq!(h.tick(1.0).shifted, 1.5);
    /// assert_eq!(h.tick(1.0).shifted, 2.0);
    /// assert_eq!(h.tick(1.0).echo, 1.0);
    /// ```
    pub fn tick(&mut self, input: f32) -> HarmonizerOutput {
        let offset = self.glissando.advance(self.requested_offset());

        HarmonizerOutput {
            echo: input,
            shifted: input + offset,
        }
    }

    /// `h.enable(ds)` enables scale degrees `ds`, degrees already enabled are left unchanged
    pub fn enable(&mut self, degrees: &[ScaleDegree]) {
        degrees.iter().for_each(|d| self.enabled |= d.bit())
    }

    /// `h.disable(ds)` disables scale degrees `ds`, degrees already disabled are left unchanged
    pub fn disable(&mut self, degrees: &[ScaleDegree]) {
        degrees.iter().for_each(|d| self.enabled &= !d.bit())
    }

    /// `h.select(ds)` enables exactly the scale degrees `ds` and disables every other degree
    pub fn select(&mut self, degrees: &[ScaleDegree]) {
        self.enabled = 0;
        self.enable(degrees);
    }

    /// `h.set_enabled(d, on)` enables scale degree `d` if `on` is true, otherwise disables it
    pub fn set_enabled(&mut self, degree: ScaleDegree, on: bool) {
        if on {
            self.enable(&[degree]);
        } else {
            self.disable(&[degree]);
        }
    }

    /// `h.is_enabled(d)` is true iff scale degree `d` is enabled
    pub fn is_enabled(&self, degree: ScaleDegree) -> bool {
        self.enabled & degree.bit() != 0
    }

    /// `h.enabled_degrees()` is the enabled scale degrees in panel order
    pub fn enabled_degrees(&self) -> Vec<ScaleDegree, NUM_SCALE_DEGREES> {
        ScaleDegree::ALL
            .iter()
            .copied()
            .filter(|d| self.is_enabled(*d))
            .collect()
    }

    /// `h.set_direction(dir)` sets whether the interval is added above or below the input
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// `h.direction()` is whether the interval is added above or below the input
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// `h.semitone_total()` is the sum of all enabled intervals in semitones, in `[0..29]`
    pub fn semitone_total(&self) -> u8 {
        ScaleDegree::ALL
            .iter()
            .filter(|d| self.is_enabled(**d))
            .map(|d| d.semitones())
            .sum()
    }

    /// `h.requested_offset()` is the signed interval the harmonizer is heading for, in volts at 1volt/octave
    pub fn requested_offset(&self) -> f32 {
        self.direction.sign() * self.semitone_total() as f32 / SEMITONES_PER_OCTAVE
    }

    /// `h.offset()` is the gliding offset applied by the most recent tick, in volts at 1volt/octave
    pub fn offset(&self) -> f32 {
        self.glissando.value()
    }

    /// `h.glissando()` is the glissando controller smoothing the offset
    pub fn glissando(&self) -> &GlissandoController {
        &self.glissando
    }

    /// `h.indicators()` is the state of the panel lights for the current switch settings
    pub fn indicators(&self) -> Indicators {
        let mut degrees = [false; NUM_SCALE_DEGREES];
        self.enabled_degrees()
            .iter()
            .for_each(|d| degrees[d.position()] = true);

        let total = self.semitone_total();

        Indicators {
            up: self.direction == Direction::Up,
            down: self.direction == Direction::Down,
            degrees,
            tens: total / 10,
            ones: total % 10,
        }
    }
}

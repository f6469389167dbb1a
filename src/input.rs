//! Keyboard bindings for the viewer and the aeroplane demo.
//!
//! Keys map to actions of two kinds: toggles fire once per physical press and
//! are queued until drained, held actions stay active while the key is down.

use std::collections::HashSet;
use std::hash::Hash;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::simulation::drive::DriveInput;

/// An action type that can be bound to keys.
pub trait Binding: Copy + Eq + Hash {
    fn from_key(code: KeyCode, shift: bool) -> Option<Self>;

    /// Edge-triggered actions fire once per press instead of being held.
    fn is_toggle(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Vehicle toggles
    FrontDoor,
    MiddleDoor,
    Window(usize),
    Fan,
    CabinLights,
    // Presentation toggles
    ViewportLayout,
    VehicleKind,
    PointLight,
    Ambient,
    Diffuse,
    Specular,
    Reset,
    Exit,
    // Held camera controls
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Pitch,
    Yaw,
    Roll,
    Orbit,
    // Held driving controls
    Accelerate,
    Brake,
    SteerLeft,
    SteerRight,
    Ascend,
    Descend,
}

fn digit(code: KeyCode) -> Option<usize> {
    match code {
        KeyCode::Digit3 => Some(0),
        KeyCode::Digit4 => Some(1),
        KeyCode::Digit5 => Some(2),
        KeyCode::Digit6 => Some(3),
        KeyCode::Digit7 => Some(4),
        KeyCode::Digit8 => Some(5),
        _ => None,
    }
}

impl Binding for Action {
    fn from_key(code: KeyCode, shift: bool) -> Option<Self> {
        if let Some(slot) = digit(code) {
            // Shift selects the right-hand row
            let index = if shift { slot + 6 } else { slot };
            return Some(Action::Window(index));
        }

        match code {
            KeyCode::Digit1 => Some(Action::FrontDoor),
            KeyCode::Digit2 => Some(Action::MiddleDoor),
            KeyCode::KeyG => Some(Action::Fan),
            KeyCode::KeyL => Some(Action::CabinLights),
            KeyCode::KeyV => Some(Action::ViewportLayout),
            KeyCode::KeyT => Some(Action::VehicleKind),
            KeyCode::F1 => Some(Action::PointLight),
            KeyCode::F2 => Some(Action::Ambient),
            KeyCode::F3 => Some(Action::Diffuse),
            KeyCode::F4 => Some(Action::Specular),
            KeyCode::Backspace => Some(Action::Reset),
            KeyCode::Escape => Some(Action::Exit),

            KeyCode::KeyW => Some(Action::MoveForward),
            KeyCode::KeyS => Some(Action::MoveBackward),
            KeyCode::KeyA => Some(Action::MoveLeft),
            KeyCode::KeyD => Some(Action::MoveRight),
            KeyCode::KeyE => Some(Action::MoveUp),
            KeyCode::KeyR => Some(Action::MoveDown),
            KeyCode::KeyX => Some(Action::Pitch),
            KeyCode::KeyY => Some(Action::Yaw),
            KeyCode::KeyZ => Some(Action::Roll),
            KeyCode::KeyF => Some(Action::Orbit),

            KeyCode::ArrowUp => Some(Action::Accelerate),
            KeyCode::ArrowDown => Some(Action::Brake),
            KeyCode::ArrowLeft => Some(Action::SteerLeft),
            KeyCode::ArrowRight => Some(Action::SteerRight),
            KeyCode::PageUp => Some(Action::Ascend),
            KeyCode::PageDown => Some(Action::Descend),

            _ => None,
        }
    }

    fn is_toggle(&self) -> bool {
        matches!(
            self,
            Action::FrontDoor
                | Action::MiddleDoor
                | Action::Window(_)
                | Action::Fan
                | Action::CabinLights
                | Action::ViewportLayout
                | Action::VehicleKind
                | Action::PointLight
                | Action::Ambient
                | Action::Diffuse
                | Action::Specular
                | Action::Reset
                | Action::Exit
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AeroplaneAction {
    ToggleExploded,
    Rotate,
    Grow,
    Shrink,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Exit,
}

impl Binding for AeroplaneAction {
    fn from_key(code: KeyCode, _shift: bool) -> Option<Self> {
        match code {
            KeyCode::KeyD => Some(AeroplaneAction::ToggleExploded),
            KeyCode::KeyR => Some(AeroplaneAction::Rotate),
            KeyCode::Equal | KeyCode::NumpadAdd => Some(AeroplaneAction::Grow),
            KeyCode::Minus | KeyCode::NumpadSubtract => Some(AeroplaneAction::Shrink),
            KeyCode::ArrowLeft => Some(AeroplaneAction::MoveLeft),
            KeyCode::ArrowRight => Some(AeroplaneAction::MoveRight),
            KeyCode::ArrowUp => Some(AeroplaneAction::MoveUp),
            KeyCode::ArrowDown => Some(AeroplaneAction::MoveDown),
            KeyCode::Escape => Some(AeroplaneAction::Exit),
            _ => None,
        }
    }

    fn is_toggle(&self) -> bool {
        matches!(
            self,
            AeroplaneAction::ToggleExploded | AeroplaneAction::Rotate | AeroplaneAction::Exit
        )
    }
}

pub struct InputManager<A: Binding> {
    held: HashSet<A>,
    toggles: Vec<A>,
    shift: bool,
}

impl<A: Binding> Default for InputManager<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Binding> InputManager<A> {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            toggles: Vec::new(),
            shift: false,
        }
    }

    /// Applies a winit key event. `captured` is true when an overlay owns the
    /// keyboard, see [`on_captured_key`](Self::on_captured_key).
    pub fn on_key_event(&mut self, event: &KeyEvent, captured: bool) {
        if let PhysicalKey::Code(code) = event.physical_key {
            if captured {
                self.on_captured_key(code, event.state);
            } else {
                self.on_key(code, event.state, event.repeat);
            }
        }
    }

    /// Key event that arrived while an overlay owns the keyboard. Presses are
    /// dropped, releases still apply so keys held beforehand let go.
    pub fn on_captured_key(&mut self, code: KeyCode, state: ElementState) {
        let modifier = matches!(code, KeyCode::ShiftLeft | KeyCode::ShiftRight);
        if state == ElementState::Released || modifier {
            self.on_key(code, state, false);
        }
    }

    pub fn on_key(&mut self, code: KeyCode, state: ElementState, repeat: bool) {
        if matches!(code, KeyCode::ShiftLeft | KeyCode::ShiftRight) {
            self.shift = state == ElementState::Pressed;
            return;
        }

        match state {
            ElementState::Pressed => {
                let Some(action) = A::from_key(code, self.shift) else {
                    return;
                };
                if action.is_toggle() {
                    if !repeat {
                        self.toggles.push(action);
                    }
                } else {
                    self.held.insert(action);
                }
            }
            ElementState::Released => {
                // Shift may have changed since the press
                for shift in [false, true] {
                    if let Some(action) = A::from_key(code, shift) {
                        self.held.remove(&action);
                    }
                }
            }
        }
    }

    pub fn is_active(&self, action: A) -> bool {
        self.held.contains(&action)
    }

    pub fn shift_held(&self) -> bool {
        self.shift
    }

    /// Returns the toggles pressed since the last call, in press order.
    pub fn drain_toggles(&mut self) -> Vec<A> {
        std::mem::take(&mut self.toggles)
    }

    /// Forgets every held key, e.g. after the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.shift = false;
    }

    /// -1, 0 or 1 depending on which of the two actions are held.
    pub fn axis(&self, positive: A, negative: A) -> f32 {
        let mut value = 0.0;
        if self.is_active(positive) {
            value += 1.0;
        }
        if self.is_active(negative) {
            value -= 1.0;
        }
        value
    }
}

impl InputManager<Action> {
    pub fn drive_input(&self) -> DriveInput {
        DriveInput {
            throttle: self.axis(Action::Accelerate, Action::Brake),
            steer: self.axis(Action::SteerLeft, Action::SteerRight),
            lift: self.axis(Action::Ascend, Action::Descend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut InputManager<Action>, code: KeyCode) {
        input.on_key(code, ElementState::Pressed, false);
    }

    fn release(input: &mut InputManager<Action>, code: KeyCode) {
        input.on_key(code, ElementState::Released, false);
    }

    #[test]
    fn digits_select_windows_and_shift_selects_right_row() {
        assert_eq!(Action::from_key(KeyCode::Digit3, false), Some(Action::Window(0)));
        assert_eq!(Action::from_key(KeyCode::Digit8, false), Some(Action::Window(5)));
        assert_eq!(Action::from_key(KeyCode::Digit3, true), Some(Action::Window(6)));
        assert_eq!(Action::from_key(KeyCode::Digit8, true), Some(Action::Window(11)));
        assert_eq!(Action::from_key(KeyCode::Digit9, false), None);
    }

    #[test]
    fn toggles_fire_once_per_press() {
        let mut input = InputManager::new();
        press(&mut input, KeyCode::Digit1);
        input.on_key(KeyCode::Digit1, ElementState::Pressed, true);
        release(&mut input, KeyCode::Digit1);
        press(&mut input, KeyCode::KeyG);

        assert_eq!(input.drain_toggles(), vec![Action::FrontDoor, Action::Fan]);
        assert!(input.drain_toggles().is_empty());
        assert!(!input.is_active(Action::FrontDoor));
    }

    #[test]
    fn shift_state_follows_modifier_keys() {
        let mut input = InputManager::new();
        press(&mut input, KeyCode::ShiftLeft);
        assert!(input.shift_held());
        press(&mut input, KeyCode::Digit4);
        release(&mut input, KeyCode::ShiftLeft);
        press(&mut input, KeyCode::Digit4);

        assert_eq!(
            input.drain_toggles(),
            vec![Action::Window(7), Action::Window(1)]
        );
    }

    #[test]
    fn held_actions_track_press_and_release() {
        let mut input = InputManager::new();
        press(&mut input, KeyCode::KeyW);
        press(&mut input, KeyCode::ArrowLeft);
        assert!(input.is_active(Action::MoveForward));

        let drive = input.drive_input();
        assert_eq!(drive.steer, 1.0);
        assert_eq!(drive.throttle, 0.0);

        release(&mut input, KeyCode::KeyW);
        assert!(!input.is_active(Action::MoveForward));

        press(&mut input, KeyCode::ArrowRight);
        assert_eq!(input.drive_input().steer, 0.0);

        input.release_all();
        assert_eq!(input.drive_input(), DriveInput::default());
    }

    #[test]
    fn captured_release_still_lets_go() {
        let mut input = InputManager::new();
        press(&mut input, KeyCode::KeyW);
        press(&mut input, KeyCode::ArrowUp);

        input.on_captured_key(KeyCode::KeyW, ElementState::Released);
        input.on_captured_key(KeyCode::ArrowUp, ElementState::Released);
        assert!(!input.is_active(Action::MoveForward));
        assert!(!input.is_active(Action::Accelerate));
    }

    #[test]
    fn captured_presses_are_dropped() {
        let mut input = InputManager::new();
        input.on_captured_key(KeyCode::KeyW, ElementState::Pressed);
        input.on_captured_key(KeyCode::KeyG, ElementState::Pressed);
        assert!(!input.is_active(Action::MoveForward));
        assert!(input.drain_toggles().is_empty());

        // Shift is tracked either way so the next release maps correctly
        input.on_captured_key(KeyCode::ShiftLeft, ElementState::Pressed);
        assert!(input.shift_held());
    }

    #[test]
    fn aeroplane_bindings() {
        let mut input: InputManager<AeroplaneAction> = InputManager::new();
        input.on_key(KeyCode::KeyD, ElementState::Pressed, false);
        input.on_key(KeyCode::Equal, ElementState::Pressed, false);

        assert_eq!(input.drain_toggles(), vec![AeroplaneAction::ToggleExploded]);
        assert!(input.is_active(AeroplaneAction::Grow));
        assert_eq!(input.axis(AeroplaneAction::Grow, AeroplaneAction::Shrink), 1.0);
    }
}

use sdl2::joystick::Joystick;
use sdl2::JoystickSubsystem;
use smallvec::SmallVec;

use gamepoll::{
    Error, GamepadButton, GamepadSource, Result, SlotSnapshot, MAX_SLOTS,
};

/// SDL2-backed [`GamepadSource`] polling the joystick subsystem.
///
/// Holds up to [`MAX_SLOTS`] open joystick handles keyed by device index.
/// SDL state must live entirely on the thread that created it.
pub struct SdlSource {
    _sdl: sdl2::Sdl,
    subsystem: JoystickSubsystem,
    joysticks: [Option<Joystick>; MAX_SLOTS],
}

impl SdlSource {
    pub fn new() -> Result<Self> {
        let sdl = sdl2::init().map_err(Error::BackendInit)?;
        let subsystem = sdl.joystick().map_err(Error::BackendInit)?;
        Ok(Self {
            _sdl: sdl,
            subsystem,
            joysticks: [None, None, None, None],
        })
    }
}

impl GamepadSource for SdlSource {
    fn poll(&mut self) -> Result<[Option<SlotSnapshot>; MAX_SLOTS]> {
        self.subsystem.update();
        let present = self.subsystem.num_joysticks().map_err(Error::Backend)? as usize;

        let mut slots = [None, None, None, None];
        for index in 0..MAX_SLOTS {
            if index >= present {
                self.joysticks[index] = None;
                continue;
            }
            let attached = matches!(&self.joysticks[index], Some(j) if j.attached());
            if !attached {
                self.joysticks[index] = self.subsystem.open(index as u32).ok();
            }
            if let Some(joystick) = self.joysticks[index].as_ref() {
                slots[index] = Some(read_joystick(joystick));
            }
        }
        Ok(slots)
    }
}

fn read_joystick(joystick: &Joystick) -> SlotSnapshot {
    let mut axes = [0.0; 4];
    let reported = joystick.num_axes();
    for (i, axis) in axes.iter_mut().enumerate() {
        if (i as u32) < reported {
            if let Ok(raw) = joystick.axis(i as u32) {
                *axis = (f64::from(raw) / f64::from(i16::MAX)).clamp(-1.0, 1.0);
            }
        }
    }

    let mut buttons = SmallVec::new();
    for i in 0..joystick.num_buttons() {
        let pressed = joystick.button(i).unwrap_or(false);
        buttons.push(GamepadButton {
            value: if pressed { 1.0 } else { 0.0 },
            pressed,
        });
    }

    SlotSnapshot { axes, buttons }
}

// Input module - Standard controller on $4016/$4017
//
// Writing bit 0 of $4016 sets the strobe. While strobe is high the
// controllers continuously latch their buttons; each read of $4016 (port 1)
// or $4017 (port 2) shifts out one button in the order
// A, B, Select, Start, Up, Down, Left, Right, followed by zeros.

use crate::bus::MemoryMappedDevice;

/// Controller buttons, valued by their bit in the shift register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A = 0x01,
    B = 0x02,
    Select = 0x04,
    Start = 0x08,
    Up = 0x10,
    Down = 0x20,
    Left = 0x40,
    Right = 0x80,
}

/// Controller structure representing NES controller state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controller {
    // Button states
    pub button_a: bool,
    pub button_b: bool,
    pub select: bool,
    pub start: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,

    /// Shift register loaded by the strobe
    shift: u8,
}

impl Controller {
    /// Create a new controller instance with all buttons released
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        let state = match button {
            Button::A => &mut self.button_a,
            Button::B => &mut self.button_b,
            Button::Select => &mut self.select,
            Button::Start => &mut self.start,
            Button::Up => &mut self.up,
            Button::Down => &mut self.down,
            Button::Left => &mut self.left,
            Button::Right => &mut self.right,
        };
        *state = pressed;
    }

    /// Buttons packed in shift-register order
    pub fn state(&self) -> u8 {
        [
            (self.button_a, Button::A),
            (self.button_b, Button::B),
            (self.select, Button::Select),
            (self.start, Button::Start),
            (self.up, Button::Up),
            (self.down, Button::Down),
            (self.left, Button::Left),
            (self.right, Button::Right),
        ]
        .iter()
        .filter(|(pressed, _)| *pressed)
        .fold(0, |bits, (_, button)| bits | *button as u8)
    }

    /// Load the shift register; opposite directions held together read as neither
    fn latch(&mut self) {
        let mut bits = self.state();
        if bits & 0x30 == 0x30 {
            bits &= !0x30;
        }
        if bits & 0xC0 == 0xC0 {
            bits &= !0xC0;
        }
        self.shift = bits;
    }

    fn shift_out(&mut self) -> u8 {
        let bit = self.shift & 0x01;
        self.shift >>= 1;
        bit
    }
}

/// Both controller ports and the shared strobe line
#[derive(Debug, Clone, Default)]
pub struct ControllerIO {
    controllers: [Controller; 2],
    strobe: bool,
}

impl ControllerIO {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller plugged into `port` (0 or 1)
    ///
    /// # Panics
    /// Panics if `port` is greater than 1
    pub fn controller_mut(&mut self, port: usize) -> &mut Controller {
        &mut self.controllers[port]
    }

    pub fn controller(&self, port: usize) -> &Controller {
        &self.controllers[port]
    }

    fn poll(&mut self) {
        self.controllers.iter_mut().for_each(Controller::latch);
    }
}

impl MemoryMappedDevice for ControllerIO {
    /// Shift one bit out of the port's controller
    fn read(&mut self, addr: u16) -> u8 {
        if self.strobe {
            self.poll();
        }

        let port = if addr == 0x4016 { 0 } else { 1 };
        self.controllers[port].shift_out()
    }

    fn write(&mut self, _addr: u16, data: u8) {
        self.strobe = data & 0x01 != 0;
        if self.strobe {
            self.poll();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(io: &mut ControllerIO, addr: u16) -> Vec<u8> {
        (0..8).map(|_| io.read(addr)).collect()
    }

    #[test]
    fn test_controller_initialization() {
        let controller = Controller::new();
        assert!(!controller.button_a);
        assert!(!controller.start);
        assert_eq!(controller.state(), 0);
    }

    #[test]
    fn test_state_bits() {
        let mut controller = Controller::new();
        controller.set_button(Button::A, true);
        controller.set_button(Button::Start, true);
        controller.set_button(Button::Right, true);
        assert_eq!(controller.state(), 0x89);

        controller.set_button(Button::A, false);
        assert_eq!(controller.state(), 0x88);
    }

    #[test]
    fn test_serial_read_order() {
        let mut io = ControllerIO::new();
        io.controller_mut(0).set_button(Button::A, true);
        io.controller_mut(0).set_button(Button::Select, true);
        io.controller_mut(0).set_button(Button::Left, true);

        io.write(0x4016, 1);
        io.write(0x4016, 0);
        assert_eq!(read_all(&mut io, 0x4016), vec![1, 0, 1, 0, 0, 0, 1, 0]);

        // Exhausted register reads zero
        assert_eq!(io.read(0x4016), 0);
    }

    #[test]
    fn test_strobe_high_keeps_reloading() {
        let mut io = ControllerIO::new();
        io.controller_mut(0).set_button(Button::A, true);
        io.write(0x4016, 1);

        assert_eq!(io.read(0x4016), 1);
        assert_eq!(io.read(0x4016), 1, "Strobe high always returns A");
    }

    #[test]
    fn test_second_port() {
        let mut io = ControllerIO::new();
        io.controller_mut(1).set_button(Button::B, true);
        io.write(0x4016, 1);
        io.write(0x4016, 0);

        assert_eq!(read_all(&mut io, 0x4017), vec![0, 1, 0, 0, 0, 0, 0, 0]);
        assert_eq!(read_all(&mut io, 0x4016), vec![0; 8]);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let mut io = ControllerIO::new();
        let pad = io.controller_mut(0);
        pad.set_button(Button::Up, true);
        pad.set_button(Button::Down, true);
        pad.set_button(Button::Left, true);

        io.write(0x4016, 1);
        io.write(0x4016, 0);
        assert_eq!(read_all(&mut io, 0x4016), vec![0, 0, 0, 0, 0, 0, 1, 0]);
        assert!(io.controller(0).up, "Button state itself is untouched");
    }
}

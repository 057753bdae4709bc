mod common;
use common::test_host;

use lc3sim_core::device::Device;
use lc3sim_core::device::keyboard::{
    KBDR, KBSR, KEYBOARD_INTERRUPT_PRIORITY, KEYBOARD_INTERRUPT_VECTOR, Keyboard,
};

const READY: u16 = 0x8000;
const INTERRUPT_ENABLE: u16 = 0x4000;

#[test]
fn test_input_sets_ready_and_latches_character() {
    let mut keyboard = Keyboard::new();
    keyboard.on_input(b'a');
    assert_eq!(keyboard.read_register(KBSR) & READY, READY);
    assert_eq!(keyboard.read_register(KBDR), u16::from(b'a'));
}

#[test]
fn test_reading_kbdr_clears_ready() {
    let mut keyboard = Keyboard::new();
    keyboard.on_input(b'x');
    assert_eq!(keyboard.read_register(KBDR), u16::from(b'x'));
    assert_eq!(keyboard.read_register(KBSR) & READY, 0);
}

#[test]
fn test_reading_kbsr_does_not_clear_ready() {
    let mut keyboard = Keyboard::new();
    keyboard.on_input(b'x');
    keyboard.read_register(KBSR);
    assert_eq!(keyboard.read_register(KBSR) & READY, READY);
}

#[test]
fn test_kbsr_write_preserves_ready_bit() {
    let mut keyboard = Keyboard::new();
    keyboard.on_input(b'x');
    keyboard.write_register(KBSR, 0);
    assert_eq!(keyboard.read_register(KBSR) & READY, READY);
    // Software cannot conjure readiness either.
    keyboard.read_register(KBDR);
    keyboard.write_register(KBSR, READY);
    assert_eq!(keyboard.read_register(KBSR) & READY, 0);
}

#[test]
fn test_kbdr_write_is_ignored() {
    let mut keyboard = Keyboard::new();
    keyboard.on_input(b'q');
    keyboard.write_register(KBDR, 0x1234);
    assert_eq!(keyboard.read_register(KBDR), u16::from(b'q'));
}

#[test]
fn test_newer_input_replaces_unread_character() {
    let mut keyboard = Keyboard::new();
    keyboard.on_input(b'a');
    keyboard.on_input(b'b');
    assert_eq!(keyboard.read_register(KBDR), u16::from(b'b'));
}

#[test]
fn test_input_with_interrupts_enabled_alerts_the_host() {
    let (host, intc, _channel) = test_host();
    let mut keyboard = Keyboard::new();
    keyboard.start(host);
    keyboard.write_register(KBSR, INTERRUPT_ENABLE);
    keyboard.on_input(b'k');
    assert_eq!(
        intc.peek(),
        Some((KEYBOARD_INTERRUPT_VECTOR, KEYBOARD_INTERRUPT_PRIORITY))
    );
}

#[test]
fn test_input_without_interrupt_enable_stays_quiet() {
    let (host, intc, _channel) = test_host();
    let mut keyboard = Keyboard::new();
    keyboard.start(host);
    keyboard.on_input(b'k');
    assert_eq!(intc.peek(), None);
}

#[test]
fn test_keyboard_subscribes_to_input_only() {
    let keyboard = Keyboard::new();
    let hooks = keyboard.hooks();
    assert!(hooks.on_input);
    assert!(!hooks.on_tick);
}

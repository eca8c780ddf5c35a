//! Unit tests for the `TicError` enum and its associated `Display` trait implementation.

use tic_rs::error::TicError;

/// Tests that the `SerialPortError` variant is correctly formatted.
#[test]
fn test_serial_port_error() {
    let err = TicError::SerialPortError("/dev/ttyAMA0: No such file".to_string());
    assert_eq!(err.to_string(), "Serial port error: /dev/ttyAMA0: No such file");
    assert!(err.is_open_error());
}

/// Tests that the `ReadError` variant is correctly formatted.
#[test]
fn test_read_error() {
    let err = TicError::ReadError("end of stream".to_string());
    assert_eq!(err.to_string(), "Serial read error: end of stream");
    assert!(!err.is_open_error());
}

/// Tests that the `DetectionExhausted` variant names the device.
#[test]
fn test_detection_exhausted_error() {
    let err = TicError::DetectionExhausted {
        device: "/dev/serial0".to_string(),
        tried: 2,
    };
    assert_eq!(
        err.to_string(),
        "Impossible to auto detect TIC mode on /dev/serial0 (2 configurations tried)"
    );
}

/// Tests the configuration parsing variants.
#[test]
fn test_configuration_errors() {
    assert_eq!(
        TicError::InvalidParity("X".to_string()).to_string(),
        "Impossible to parse parity named: X"
    );
    assert_eq!(
        TicError::InvalidStopBits("3".to_string()).to_string(),
        "Impossible to parse stop bits named: 3"
    );
    assert_eq!(
        TicError::InvalidMode("modbus".to_string()).to_string(),
        "Impossible to parse TIC mode named: modbus"
    );
}

#[test]
fn test_from_serial_error() {
    let serial = tokio_serial::Error::new(tokio_serial::ErrorKind::NoDevice, "gone");
    let err: TicError = serial.into();
    assert!(matches!(err, TicError::SerialPortError(ref m) if m.contains("gone")));
}

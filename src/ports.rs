//! Finding a free TCP port.

use std::{
    io,
    net::{Ipv4Addr, TcpListener},
};

use crate::error::{Error, Result};

/// Returns the first port in `start..start + attempts` that can be bound on
/// all interfaces. The probe socket is closed before returning, so the port
/// is not reserved.
///
/// # Errors
///
/// Returns [`Error::PortExhausted`] if no port in the range can be bound.
pub fn find_available_port(start: u16, attempts: u16) -> Result<u16> {
    bind_available_port(start, attempts).map(|(_, port)| port)
}

/// Like [`find_available_port`], but keeps the bound listener so nothing can
/// claim the port before the server starts.
///
/// # Errors
///
/// Returns [`Error::PortExhausted`] if no port in the range can be bound.
pub fn bind_available_port(start: u16, attempts: u16) -> Result<(TcpListener, u16)> {
    let end = u32::from(start) + u32::from(attempts);

    for port in candidates(start, attempts) {
        match bind(port) {
            Ok(listener) => {
                tracing::debug!(port, "bound port");
                return Ok((listener, port));
            }
            Err(error) => tracing::trace!(port, %error, "port unavailable"),
        }
    }

    Err(Error::PortExhausted { start, end })
}

/// Ports `start..start + attempts`, clipped to the valid range. Port 0 would
/// ask the OS for an arbitrary port, so it is skipped.
fn candidates(start: u16, attempts: u16) -> impl Iterator<Item = u16> {
    (start..=u16::MAX)
        .take(usize::from(attempts))
        .filter(|port| *port != 0)
}

fn bind(port: u16) -> io::Result<TcpListener> {
    TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
}

//! Reversible modular arithmetic synthesized into a [`CircuitBuilder`]
//!
//! The components are layered, each one built from the one below:
//!
//! - [`phi_add`]: constant addition modulo `2^w` in the Fourier basis
//! - [`phi_add_mod_n`]: controlled constant addition modulo `N`
//! - [`multiply_mod_n`]: controlled in-place multiplication by a constant modulo `N`
//! - [`power_mod_n`]: modular exponentiation controlled by an exponent register
//!
//! All registers are little-endian and every borrowed auxiliary line is
//! handed back in the state it was received in.
//!
//! [`CircuitBuilder`]: qdlog_core::CircuitBuilder

pub mod exponentiator;
pub mod fourier_adder;
pub mod modular_adder;
pub mod multiplier;

pub use exponentiator::power_mod_n;
pub use fourier_adder::{get_angles, phi_add};
pub use modular_adder::phi_add_mod_n;
pub use multiplier::multiply_mod_n;

use crate::error::{DiscreteLogError, Result};
use crate::ntheory::bit_width;

/// Require `0 < modulus < 2^n`
pub(crate) fn check_modulus(modulus: u64, n: usize) -> Result<()> {
    if modulus == 0 || bit_width(modulus) > n {
        return Err(DiscreteLogError::ModulusOutOfRange { modulus, width: n });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_modulus() {
        assert!(check_modulus(7, 3).is_ok());
        assert!(check_modulus(1, 1).is_ok());
        assert!(check_modulus(8, 3).is_err());
        assert!(check_modulus(0, 3).is_err());
        assert!(check_modulus(u64::MAX, 64).is_ok());
    }
}

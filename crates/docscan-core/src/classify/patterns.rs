//! Regex grammars for the recognized document fields.
//!
//! Classes are spelled out as ASCII ranges: `regex` makes `\d` and `\w`
//! Unicode-aware, which would let OCR output in other scripts slip through.

use lazy_static::lazy_static;
use regex::Regex;

/// Country prefix of the only IBAN layout we recognize.
pub const IBAN_PREFIX_FRANCE: &str = "FR";

/// Length of a French IBAN without separators.
pub const IBAN_FR_LENGTH: usize = 27;

lazy_static! {
    // French IBAN: FR + 12 digits (check digits, bank, branch) + 11 account chars + 2-digit RIB key
    pub static ref IBAN_FR: Regex = Regex::new(
        r"^FR[0-9]{12}[0-9A-Z]{11}[0-9]{2}$"
    ).unwrap();

    // Passport MRZ line 1: P< + issuing country + surname (optional second part) << given name
    pub static ref PASSPORT_MRZ: Regex = Regex::new(
        r"^P<([A-Za-z0-9_]{3})([A-Z]+)(<([A-Z]+))?<<([A-Z]+)"
    ).unwrap();

    // ID-card MRZ line 1: 2 type letters, 3-letter country, 25-char name field, two 3-char office fields.
    // Open at the end: OCR often reads extra filler past the fixed width.
    pub static ref ID_CARD_MRZ: Regex = Regex::new(
        r"^([A-Z])([A-Z])([A-Z]{3})([A-Z<]{25})([A-Z0-9<]{3})([0-9<]{3})"
    ).unwrap();
}

//! DER serialization of ECDSA `(r, s)` signature pairs.
//!
//! Format: `0x30 <len> 0x02 <r_len> <r> 0x02 <s_len> <s>`. Only short-form
//! lengths occur for secp256k1 signatures, so long-form lengths are rejected.

use crate::error::DerError;
use crate::PrimitivesError;

const SEQUENCE_TAG: u8 = 0x30;
const INTEGER_TAG: u8 = 0x02;
/// A 256-bit integer plus one sign-padding byte.
const MAX_INTEGER_LEN: usize = 33;

/// Encode big-endian `r` and `s` as a DER signature.
///
/// Redundant leading zero bytes are stripped and a single 0x00 is re-added
/// when the high bit of the first remaining byte is set, so inputs that
/// already carry a sign-padding byte encode identically.
///
/// # Returns
/// The DER bytes, or `MalformedInteger` if either canonical integer is
/// longer than 33 bytes.
pub fn encode(r: &[u8], s: &[u8]) -> Result<Vec<u8>, DerError> {
    let rb = canonicalize_int(r);
    let sb = canonicalize_int(s);
    for int in [&rb, &sb] {
        if int.len() > MAX_INTEGER_LEN {
            return Err(DerError::MalformedInteger(format!(
                "length {} exceeds {}",
                int.len(),
                MAX_INTEGER_LEN
            )));
        }
    }

    let total_len = 6 + rb.len() + sb.len();
    let mut out = Vec::with_capacity(total_len);
    out.push(SEQUENCE_TAG);
    out.push((total_len - 2) as u8);
    out.push(INTEGER_TAG);
    out.push(rb.len() as u8);
    out.extend_from_slice(&rb);
    out.push(INTEGER_TAG);
    out.push(sb.len() as u8);
    out.extend_from_slice(&sb);
    Ok(out)
}

/// Encode hex `r` and `s` as an upper-case hex DER signature.
pub fn encode_hex(r_hex: &str, s_hex: &str) -> Result<String, PrimitivesError> {
    let r = hex::decode(r_hex)?;
    let s = hex::decode(s_hex)?;
    Ok(hex::encode_upper(encode(&r, &s)?))
}

/// Decode a strict DER signature into big-endian `r` and `s` with the sign
/// padding removed.
///
/// Integers must be minimal and non-negative: a set high bit without a
/// 0x00 pad, or a 0x00 pad that is not needed, is `MalformedInteger`.
///
/// # Arguments
/// * `der` - The DER-encoded signature.
///
/// # Returns
/// `(r, s)` on success, or the structural defect found.
pub fn decode(der: &[u8]) -> Result<(Vec<u8>, Vec<u8>), DerError> {
    let (&tag, rest) = der.split_first().ok_or(DerError::NotEnoughData)?;
    if tag != SEQUENCE_TAG {
        return Err(DerError::InvalidSequenceTag(tag));
    }
    let (&declared, body) = rest.split_first().ok_or(DerError::NotEnoughData)?;
    let declared = declared as usize;
    if declared & 0x80 != 0 || declared != body.len() {
        return Err(DerError::LengthMismatch {
            declared,
            actual: body.len(),
        });
    }

    let (r, rest) = parse_integer(body)?;
    let (s, rest) = parse_integer(rest)?;
    if !rest.is_empty() {
        return Err(DerError::LeftoverBytes(rest.len()));
    }
    Ok((r, s))
}

/// Decode a hex DER signature into `(r, s)`.
pub fn decode_hex(der_hex: &str) -> Result<(Vec<u8>, Vec<u8>), PrimitivesError> {
    let der = hex::decode(der_hex)?;
    Ok(decode(&der)?)
}

/// Parse one `0x02 <len> <bytes>` element and return it with the remaining input.
fn parse_integer(data: &[u8]) -> Result<(Vec<u8>, &[u8]), DerError> {
    if data.len() < 2 {
        return Err(DerError::NotEnoughData);
    }
    if data[0] != INTEGER_TAG {
        return Err(DerError::InvalidIntegerTag(data[0]));
    }
    let len = data[1] as usize;
    if len == 0 {
        return Err(DerError::MalformedInteger("zero length".to_string()));
    }
    if len > MAX_INTEGER_LEN {
        return Err(DerError::MalformedInteger(format!(
            "length {} exceeds {}",
            len, MAX_INTEGER_LEN
        )));
    }
    let rest = &data[2..];
    if rest.len() < len {
        return Err(DerError::NotEnoughData);
    }
    let (value, rest) = rest.split_at(len);
    if value[0] & 0x80 != 0 {
        return Err(DerError::MalformedInteger("negative integer".to_string()));
    }
    if value[0] == 0x00 && len > 1 && value[1] & 0x80 == 0 {
        return Err(DerError::MalformedInteger(
            "non-minimal integer encoding".to_string(),
        ));
    }
    Ok((trim_leading_zeros(value).to_vec(), rest))
}

fn trim_leading_zeros(val: &[u8]) -> &[u8] {
    let start = val.iter().position(|&b| b != 0).unwrap_or(val.len());
    &val[start..]
}

/// Canonicalize a big-endian integer for DER: minimal bytes, plus a 0x00
/// pad when the high bit is set.
fn canonicalize_int(val: &[u8]) -> Vec<u8> {
    let trimmed = trim_leading_zeros(val);
    if trimmed.is_empty() {
        return vec![0x00];
    }
    let mut out = Vec::with_capacity(trimmed.len() + 1);
    if trimmed[0] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(trimmed);
    out
}

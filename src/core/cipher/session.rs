//! Symmetric field cipher for the local session cache.
//!
//! AES-256-CBC with PKCS#7 padding and a fresh random 16-byte IV per call.
//! The wire form is `base64(iv):base64(ciphertext)`.
//!
//! SECURITY: the key is whatever 32 bytes the caller passes in; the session
//! cache uses a slice of the hashed machine id with no salt and no KDF.
//! Anyone who can read the machine id and the session file can recover the
//! credentials. The format is kept as-is so existing session files stay
//! readable.

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{AuthError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

const IV_LEN: usize = 16;

/// Encrypt one field.
pub fn encrypt_field(plaintext: &str, key: &[u8]) -> Result<String> {
    let mut iv = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut iv);

    let encryptor = Aes256CbcEnc::new_from_slices(key, &iv)
        .map_err(|e| AuthError::CorruptSession(format!("bad session key: {}", e)))?;
    let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    Ok(format!("{}:{}", STANDARD.encode(iv), STANDARD.encode(ciphertext)))
}

/// Decrypt one field produced by [`encrypt_field`].
///
/// # Errors
///
/// `AuthError::CorruptSession` for a missing separator, bad base64, a wrong
/// key (padding check fails) or non-UTF-8 plaintext.
pub fn decrypt_field(encoded: &str, key: &[u8]) -> Result<Zeroizing<String>> {
    let (iv_b64, ct_b64) = encoded
        .split_once(':')
        .ok_or_else(|| AuthError::CorruptSession("missing iv separator".to_string()))?;

    let iv = STANDARD
        .decode(iv_b64)
        .map_err(|e| AuthError::CorruptSession(format!("iv: {}", e)))?;
    let ciphertext = STANDARD
        .decode(ct_b64)
        .map_err(|e| AuthError::CorruptSession(format!("ciphertext: {}", e)))?;

    let decryptor = Aes256CbcDec::new_from_slices(key, &iv)
        .map_err(|e| AuthError::CorruptSession(format!("bad session key or iv: {}", e)))?;
    let plaintext = decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| AuthError::CorruptSession("wrong key or corrupted bytes".to_string()))?;

    let text = String::from_utf8(plaintext)
        .map_err(|_| AuthError::CorruptSession("wrong key or corrupted bytes".to_string()))?;
    Ok(Zeroizing::new(text))
}

//! 信封加密
//!
//! 每次加密生成一次性的 AES-256 密钥，令牌用 AES-GCM 加密，AES 密钥
//! 再用 RSA-OAEP(SHA-256) 包裹。输出为
//! `base64(RSA 包裹密钥 || nonce || 密文 || tag)`，包裹密钥长度等于 RSA 模长。

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use authgate_errors::{AppError, AppResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

const AES_KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// 信封加密服务
#[derive(Clone)]
pub struct EnvelopeService {
    public_key: RsaPublicKey,
    private_key: RsaPrivateKey,
}

impl EnvelopeService {
    /// 公钥必须与私钥成对
    pub fn new(public_key: RsaPublicKey, private_key: RsaPrivateKey) -> AppResult<Self> {
        if private_key.to_public_key() != public_key {
            return Err(AppError::crypto(
                "Envelope public key does not match private key",
            ));
        }

        Ok(Self {
            public_key,
            private_key,
        })
    }

    /// 从 PEM 加载密钥对
    ///
    /// 公钥为 PKIX (`PUBLIC KEY`)，私钥优先按 PKCS#8 解析，失败后再尝试 PKCS#1。
    pub fn from_pem(public_key_pem: &str, private_key_pem: &str) -> AppResult<Self> {
        let public_key = RsaPublicKey::from_public_key_pem(public_key_pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(public_key_pem))
            .map_err(|e| AppError::crypto(format!("Failed to parse public key: {}", e)))?;

        let private_key = match RsaPrivateKey::from_pkcs8_pem(private_key_pem) {
            Ok(key) => key,
            Err(_) => {
                tracing::debug!("Private key is not PKCS#8, trying PKCS#1");
                RsaPrivateKey::from_pkcs1_pem(private_key_pem)
                    .map_err(|e| AppError::crypto(format!("Failed to parse private key: {}", e)))?
            }
        };

        Self::new(public_key, private_key)
    }

    /// RSA 模长（字节），即包裹密钥的长度
    pub fn key_size(&self) -> usize {
        self.private_key.size()
    }

    /// 加密令牌
    pub fn encrypt(&self, token: &str) -> AppResult<String> {
        let mut key_bytes = [0u8; AES_KEY_LEN];
        OsRng.fill_bytes(&mut key_bytes);
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);

        let cipher = Aes256Gcm::new_from_slice(&key_bytes)
            .map_err(|e| AppError::crypto(format!("Failed to create cipher: {}", e)))?;
        let sealed = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), token.as_bytes())
            .map_err(|_| AppError::crypto("Failed to encrypt token"))?;

        let wrapped_key = self
            .public_key
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), &key_bytes)
            .map_err(|e| AppError::crypto(format!("Failed to wrap AES key: {}", e)))?;

        let mut payload = Vec::with_capacity(wrapped_key.len() + NONCE_LEN + sealed.len());
        payload.extend_from_slice(&wrapped_key);
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&sealed);

        Ok(STANDARD.encode(payload))
    }

    /// 解密令牌，任何一步失败都返回错误，绝不返回部分明文
    pub fn decrypt(&self, encrypted: &str) -> AppResult<String> {
        let data = STANDARD
            .decode(encrypted)
            .map_err(|e| AppError::crypto(format!("Failed to decode envelope: {}", e)))?;

        let key_size = self.key_size();
        if data.len() < key_size {
            return Err(AppError::crypto("Encrypted data too short"));
        }
        let (wrapped_key, rest) = data.split_at(key_size);

        let key_bytes = self
            .private_key
            .decrypt_blinded(&mut OsRng, Oaep::new::<Sha256>(), wrapped_key)
            .map_err(|e| AppError::crypto(format!("Failed to unwrap AES key: {}", e)))?;
        if key_bytes.len() != AES_KEY_LEN {
            return Err(AppError::crypto("Unwrapped AES key has invalid length"));
        }

        if rest.len() < NONCE_LEN {
            return Err(AppError::crypto("Ciphertext too short"));
        }
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

        let cipher = Aes256Gcm::new_from_slice(&key_bytes)
            .map_err(|e| AppError::crypto(format!("Failed to create cipher: {}", e)))?;
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| AppError::crypto("Failed to decrypt token"))?;

        String::from_utf8(plaintext)
            .map_err(|_| AppError::crypto("Decrypted token is not valid UTF-8"))
    }
}

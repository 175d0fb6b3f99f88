//! Integration tests for cloakline
//!
//! Covers the full pipeline over both carriers:
//! - Encryption round trips, wrong passwords and tampering
//! - Image and audio embedding, capacity limits, no-data detection
//! - File round trips through PNG and WAV

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{ImageBuffer, Rgba};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cloakline::crypto::{decrypt, encrypt, encrypt_with_rng};
use cloakline::wav::{build_wav, locate_data_chunk, DecodedAudio};
use cloakline::{
    decode, embed, encode, encode_with_rng, extract, AudioCarrier, Carrier, ImageCarrier,
    StegoError,
};

const MESSAGE: &str = "RENDEZVOUS AT DAWN";
const PASSWORD: &str = "correct-horse-battery-staple";

/// A 64x64 RGBA gradient with varying alpha (16384 bytes).
fn cover_image() -> ImageCarrier {
    let img = ImageBuffer::from_fn(64, 64, |x, y| {
        Rgba([
            (x * 4) as u8,
            (y * 4) as u8,
            ((x ^ y) * 3) as u8,
            (255 - x - y) as u8,
        ])
    });
    ImageCarrier::from_rgba(img)
}

/// A stereo 16-bit carrier with two tones.
fn cover_audio(frames: usize) -> AudioCarrier {
    let tone = |freq: f32| -> Vec<f32> {
        (0..frames)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / 22050.0).sin() * 0.8)
            .collect()
    };
    AudioCarrier::from_decoded(&DecodedAudio {
        channels: vec![tone(440.0), tone(660.0)],
        sample_rate: 22050,
    })
    .unwrap()
}

/// Concrete scenario: hide, reveal, wrong password, corrupted blob.
#[test]
fn test_rendezvous_scenario() {
    let cover = cover_image();
    assert_eq!(cover.as_rgba_bytes().len(), 16384);

    let stego = encode(cover, MESSAGE, PASSWORD).unwrap();
    assert_eq!(decode(&stego, PASSWORD).unwrap(), MESSAGE);

    assert!(matches!(
        decode(&stego, "wrong"),
        Err(StegoError::AuthenticationFailure)
    ));

    let blob = String::from_utf8(extract(&stego).unwrap()).unwrap();
    let mut bytes = BASE64.decode(&blob).unwrap();
    bytes[20] ^= 0x01;
    assert!(matches!(
        decrypt(&BASE64.encode(&bytes), PASSWORD),
        Err(StegoError::AuthenticationFailure)
    ));
}

/// Round trip for empty and multi-byte messages
#[test]
fn test_roundtrip_various_messages() {
    for message in ["", "a", "Grüße aus Köln", "密码学 🔐 steganography"] {
        let blob = encrypt(message, "pw").unwrap();
        assert_eq!(decrypt(&blob, "pw").unwrap(), message);

        let stego = encode(cover_image(), message, "pw").unwrap();
        assert_eq!(decode(&stego, "pw").unwrap(), message);
    }
}

/// Flipping any single bit of the ciphertext/tag region is detected
#[test]
fn test_tamper_sensitivity_across_blob() {
    let blob = encrypt_with_rng("tamper", "pw", &mut StdRng::seed_from_u64(99)).unwrap();
    let bytes = BASE64.decode(&blob).unwrap();

    // Every 5th byte of the ciphertext and tag, one bit each.
    for index in (28..bytes.len()).step_by(5) {
        let mut corrupted = bytes.clone();
        corrupted[index] ^= 0x80 >> (index % 8);
        assert!(matches!(
            decrypt(&BASE64.encode(&corrupted), "pw"),
            Err(StegoError::AuthenticationFailure)
        ));
    }
}

/// Alpha bytes are byte-identical before and after embedding
#[test]
fn test_alpha_channel_preserved() {
    let cover = cover_image();
    let stego = encode(cover.clone(), &"x".repeat(500), "pw").unwrap();

    let before = cover.as_rgba_bytes();
    let after = stego.as_rgba_bytes();
    for index in (3..before.len()).step_by(4) {
        assert_eq!(before[index], after[index]);
    }
    assert_ne!(before, after);
}

/// A bitstream exactly as large as the usable capacity fits; one byte more does not
#[test]
fn test_image_capacity_boundary() {
    let cover = cover_image();
    // 12288 usable bits - 32 header bits = 1532 payload bytes
    let fits = vec![0x5Au8; 1532];
    let stego = embed(cover.clone(), &fits).unwrap();
    assert_eq!(extract(&stego).unwrap(), fits);

    let too_big = vec![0x5Au8; 1533];
    assert!(matches!(
        embed(cover, &too_big),
        Err(StegoError::CapacityExceeded {
            needed: 12296,
            capacity: 12288
        })
    ));
}

/// Audio round trip through the full pipeline
#[test]
fn test_audio_roundtrip() {
    let cover = cover_audio(4000);
    let data = cover.data_chunk();
    assert_eq!(data.len, 4000 * 2 * 2);

    let stego = encode(cover.clone(), MESSAGE, PASSWORD).unwrap();
    assert_eq!(decode(&stego, PASSWORD).unwrap(), MESSAGE);
    assert!(matches!(
        decode(&stego, "wrong"),
        Err(StegoError::AuthenticationFailure)
    ));

    // Header untouched, only data bytes differ
    assert_eq!(&stego.as_bytes()[..data.offset], &cover.as_bytes()[..data.offset]);
}

/// Audio capacity boundary: one bit per data chunk byte
#[test]
fn test_audio_capacity_boundary() {
    let wav = build_wav(&[0u8; 32 + 80], 1, 8000).unwrap();
    let cover = AudioCarrier::from_wav(wav).unwrap();
    assert_eq!(cover.capacity_bits(), 112);

    let stego = embed(cover.clone(), &[1u8; 10]).unwrap();
    assert_eq!(extract(&stego).unwrap(), vec![1u8; 10]);

    assert!(matches!(
        embed(cover, &[1u8; 11]),
        Err(StegoError::CapacityExceeded { .. })
    ));
}

/// Carriers that were never embedded into report no data
#[test]
fn test_no_hidden_data_detection() {
    assert!(matches!(
        decode(&cover_image(), PASSWORD),
        Err(StegoError::NoHiddenData)
    ));
    assert!(matches!(
        decode(&cover_audio(2000), PASSWORD),
        Err(StegoError::NoHiddenData)
    ));
}

/// WAV buffers without a data chunk are rejected
#[test]
fn test_invalid_container() {
    let mut wav = build_wav(&[0u8; 8], 1, 8000).unwrap();
    wav[36..40].copy_from_slice(b"junk");

    assert!(matches!(
        locate_data_chunk(&wav),
        Err(StegoError::InvalidContainer(_))
    ));
    assert!(matches!(
        AudioCarrier::from_wav(wav),
        Err(StegoError::InvalidContainer(_))
    ));
}

/// Seeded randomness makes the whole pipeline reproducible
#[test]
fn test_deterministic_pipeline_with_seeded_rng() {
    let first = encode_with_rng(cover_image(), MESSAGE, PASSWORD, &mut StdRng::seed_from_u64(5)).unwrap();
    let second = encode_with_rng(cover_image(), MESSAGE, PASSWORD, &mut StdRng::seed_from_u64(5)).unwrap();
    let unseeded = encode(cover_image(), MESSAGE, PASSWORD).unwrap();

    assert_eq!(first, second);
    assert_ne!(first, unseeded);
}

/// PNG and WAV files survive a save/load cycle
#[test]
fn test_file_roundtrips() {
    let dir = tempfile::tempdir().unwrap();

    let png = dir.path().join("cover.png");
    encode(cover_image(), MESSAGE, PASSWORD).unwrap().save(&png).unwrap();
    let loaded = ImageCarrier::from_file(&png).unwrap();
    assert_eq!(decode(&loaded, PASSWORD).unwrap(), MESSAGE);

    let wav = dir.path().join("cover.wav");
    encode(cover_audio(3000), MESSAGE, PASSWORD).unwrap().save(&wav).unwrap();
    let loaded = AudioCarrier::from_file(&wav).unwrap();
    assert_eq!(decode(&loaded, PASSWORD).unwrap(), MESSAGE);
}

/// A 24-bit WAV input is normalized to 16-bit PCM before embedding
#[test]
fn test_non_canonical_wav_is_normalized() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 24,
        sample_format: hound::SampleFormat::Int,
    };
    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(std::io::Cursor::new(&mut bytes), spec).unwrap();
        for i in 0..3000i32 {
            writer.write_sample((i * 997) % 8_000_000 - 4_000_000).unwrap();
        }
        writer.finalize().unwrap();
    }

    let cover = AudioCarrier::from_bytes(&bytes).unwrap();
    let format = cover.format().unwrap();
    assert_eq!(format.bits_per_sample, 16);
    assert_eq!(format.sample_rate, 16000);
    assert_eq!(cover.data_chunk().len, 6000);

    let stego = encode(cover, MESSAGE, PASSWORD).unwrap();
    let reloaded = AudioCarrier::from_bytes(stego.as_bytes()).unwrap();
    assert_eq!(decode(&reloaded, PASSWORD).unwrap(), MESSAGE);
}

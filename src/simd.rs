//! SIMD batch writes for pixel spans and attribute lanes.
//!
//! x86_64 uses SSE2 (part of the baseline, no runtime detection needed): one
//! 128-bit store writes 4 pixels, one packed add updates 4 attribute lanes.
//! Other targets get a portable block copy that the compiler can vectorize.
//! Every vector path has a scalar twin that produces identical output.

/// Pixels written by one vector store
pub const BLOCK_PIXELS: usize = 4;
const BLOCK_BYTES: usize = BLOCK_PIXELS * 4;

/// Spans shorter than this are cheaper to write with the scalar loop
pub const SIMD_SPAN_MIN: usize = 16;

/// Write `px` into every pixel of `dst`, one pixel at a time
#[inline]
pub fn fill_pixels_scalar(dst: &mut [u8], px: [u8; 4]) {
    for chunk in dst.chunks_exact_mut(4) {
        chunk.copy_from_slice(&px);
    }
}

/// Write `px` into every pixel of `dst` using vector stores.
///
/// Three phases: a scalar prefix up to the first 16-byte aligned pixel, full
/// blocks, then a scalar suffix for the remainder. `dst.len()` must be a
/// multiple of 4.
pub fn fill_pixels(dst: &mut [u8], px: [u8; 4]) {
    debug_assert_eq!(dst.len() % 4, 0);
    let count = dst.len() / 4;

    let prefix = aligned_prefix(dst, count);
    let blocks = (count - prefix) / BLOCK_PIXELS;
    let body_start = prefix * 4;
    let body_end = body_start + blocks * BLOCK_BYTES;

    let (head, rest) = dst.split_at_mut(body_start);
    let (body, tail) = rest.split_at_mut(body_end - body_start);
    fill_pixels_scalar(head, px);
    fill_blocks(body, px);
    fill_pixels_scalar(tail, px);
}

/// Number of leading pixels before `dst` reaches a 16-byte boundary.
/// Zero when the slice can never align on a pixel boundary; the stores are
/// unaligned-safe anyway.
#[inline]
fn aligned_prefix(dst: &[u8], count: usize) -> usize {
    let offset = dst.as_ptr().align_offset(BLOCK_BYTES);
    if offset % 4 == 0 {
        (offset / 4).min(count)
    } else {
        0
    }
}

#[cfg(target_arch = "x86_64")]
fn fill_blocks(dst: &mut [u8], px: [u8; 4]) {
    use std::arch::x86_64::{__m128i, _mm_set1_epi32, _mm_storeu_si128};

    debug_assert_eq!(dst.len() % BLOCK_BYTES, 0);
    // Safety: SSE2 is always available on x86_64, and every store covers
    // exactly one 16-byte chunk of the slice.
    unsafe {
        let block = _mm_set1_epi32(i32::from_ne_bytes(px));
        for chunk in dst.chunks_exact_mut(BLOCK_BYTES) {
            _mm_storeu_si128(chunk.as_mut_ptr() as *mut __m128i, block);
        }
    }
}

#[cfg(not(target_arch = "x86_64"))]
fn fill_blocks(dst: &mut [u8], px: [u8; 4]) {
    let mut block = [0u8; BLOCK_BYTES];
    fill_pixels_scalar(&mut block, px);
    for chunk in dst.chunks_exact_mut(BLOCK_BYTES) {
        chunk.copy_from_slice(&block);
    }
}

/// `acc[i] += delta[i]` over the common length, one lane at a time
#[inline]
pub fn add_lanes_scalar(acc: &mut [f32], delta: &[f32]) {
    for (a, d) in acc.iter_mut().zip(delta) {
        *a += *d;
    }
}

/// `acc[i] += delta[i]` over the common length, 4 lanes per packed add
#[cfg(target_arch = "x86_64")]
pub fn add_lanes(acc: &mut [f32], delta: &[f32]) {
    use std::arch::x86_64::{_mm_add_ps, _mm_loadu_ps, _mm_storeu_ps};

    let n = acc.len().min(delta.len());
    let (acc, delta) = (&mut acc[..n], &delta[..n]);
    let full = n - n % 4;

    for (a, d) in acc[..full]
        .chunks_exact_mut(4)
        .zip(delta[..full].chunks_exact(4))
    {
        // Safety: both chunks hold exactly 4 f32; loads/stores are unaligned.
        unsafe {
            let sum = _mm_add_ps(_mm_loadu_ps(a.as_ptr()), _mm_loadu_ps(d.as_ptr()));
            _mm_storeu_ps(a.as_mut_ptr(), sum);
        }
    }
    add_lanes_scalar(&mut acc[full..], &delta[full..]);
}

#[cfg(not(target_arch = "x86_64"))]
#[inline]
pub fn add_lanes(acc: &mut [f32], delta: &[f32]) {
    add_lanes_scalar(acc, delta);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_matches_scalar_for_every_length() {
        let px = [1, 2, 3, 255];
        // Offsets into a larger buffer shift the alignment of the span start
        for offset in 0..BLOCK_PIXELS {
            for len in 0..=3 * SIMD_SPAN_MIN + 3 {
                let mut simd = vec![0u8; (offset + len + 2) * 4];
                let mut scalar = simd.clone();
                let range = offset * 4..(offset + len) * 4;
                fill_pixels(&mut simd[range.clone()], px);
                fill_pixels_scalar(&mut scalar[range], px);
                assert_eq!(simd, scalar, "offset {} len {}", offset, len);
            }
        }
    }

    #[test]
    fn test_fill_leaves_neighbours_untouched() {
        let mut buf = vec![9u8; 40 * 4];
        fill_pixels(&mut buf[4..36 * 4], [0, 0, 0, 0]);
        assert_eq!(&buf[..4], &[9, 9, 9, 9]);
        assert_eq!(&buf[36 * 4..], &[9u8; 16][..]);
        assert!(buf[4..36 * 4].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_add_lanes_matches_scalar() {
        for n in 0..=11 {
            let delta: Vec<f32> = (0..n).map(|i| 0.1 * i as f32 - 0.3).collect();
            let mut simd: Vec<f32> = (0..n).map(|i| i as f32 * 1.7).collect();
            let mut scalar = simd.clone();
            for _ in 0..50 {
                add_lanes(&mut simd, &delta);
                add_lanes_scalar(&mut scalar, &delta);
            }
            // Bit-exact: packed and scalar IEEE adds round identically
            assert_eq!(simd, scalar, "width {}", n);
        }
    }
}

//! Cross-frame radiance accumulation and color packing.

use ember_math::{Interval, Vec4};

/// Running per-pixel radiance sum across the frames of one accumulation cycle.
///
/// Length is always `width * height`. Resizing reallocates and drops the old
/// contents; nothing accumulated before a resize survives it.
#[derive(Debug, Clone, Default)]
pub struct AccumulationBuffer {
    width: u32,
    height: u32,
    data: Vec<Vec4>,
}

impl AccumulationBuffer {
    /// Create a zeroed buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![Vec4::ZERO; (width as usize) * (height as usize)],
        }
    }

    /// Reallocate for new dimensions. Returns false when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }

        *self = Self::new(width, height);
        true
    }

    /// Zero every slot.
    pub fn clear(&mut self) {
        self.data.fill(Vec4::ZERO);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the running sum at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.data[(y * self.width + x) as usize]
    }

    pub fn as_slice(&self) -> &[Vec4] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Vec4] {
        &mut self.data
    }
}

/// Pack a color into RGBA8 with R in the low byte and A in the high byte.
///
/// Channels are expected in [0, 1]; values outside saturate.
#[inline]
pub fn color_to_rgba(color: Vec4) -> u32 {
    let r = (color.x * 255.0) as u8;
    let g = (color.y * 255.0) as u8;
    let b = (color.z * 255.0) as u8;
    let a = (color.w * 255.0) as u8;

    (u32::from(a) << 24) | (u32::from(b) << 16) | (u32::from(g) << 8) | u32::from(r)
}

/// Average an accumulated sum over `frame_index` frames, clamp to the
/// displayable range and pack it.
#[inline]
pub fn resolve(sum: Vec4, frame_index: u32) -> u32 {
    let average = sum / frame_index as f32;
    let unit = Interval::UNIT;
    color_to_rgba(Vec4::new(
        unit.clamp(average.x),
        unit.clamp(average.y),
        unit.clamp(average.z),
        unit.clamp(average.w),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_red() {
        assert_eq!(color_to_rgba(Vec4::new(1.0, 0.0, 0.0, 1.0)), 0xFF0000FF);
    }

    #[test]
    fn test_pack_byte_order() {
        let packed = color_to_rgba(Vec4::new(0.0, 1.0, 0.0, 0.0));
        assert_eq!(packed, 0x0000FF00);
        let packed = color_to_rgba(Vec4::new(0.0, 0.0, 1.0, 0.0));
        assert_eq!(packed, 0x00FF0000);
        assert_eq!(packed.to_le_bytes(), [0x00, 0x00, 0xFF, 0x00]);
    }

    #[test]
    fn test_pack_truncates() {
        // 0.5 * 255 = 127.5 -> 127
        assert_eq!(color_to_rgba(Vec4::new(0.5, 0.0, 0.0, 0.0)), 127);
    }

    #[test]
    fn test_resolve_divides_and_clamps() {
        let sum = Vec4::new(2.0, 6.0, -1.0, 2.0);
        // (1.0, 3.0 -> 1.0, -0.5 -> 0.0, 1.0)
        assert_eq!(resolve(sum, 2), 0xFF00FFFF);
        assert_eq!(resolve(Vec4::new(f32::INFINITY, 0.0, 0.0, 1.0), 1), 0xFF0000FF);
    }

    #[test]
    fn test_new_is_zeroed() {
        let buffer = AccumulationBuffer::new(4, 3);
        assert_eq!(buffer.len(), 12);
        assert!(buffer.as_slice().iter().all(|v| *v == Vec4::ZERO));
    }

    #[test]
    fn test_resize_same_dims_is_noop() {
        let mut buffer = AccumulationBuffer::new(4, 3);
        buffer.as_mut_slice()[5] = Vec4::ONE;

        assert!(!buffer.resize(4, 3));
        assert_eq!(buffer.get(1, 1), Vec4::ONE);
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut buffer = AccumulationBuffer::new(4, 3);
        buffer.as_mut_slice().fill(Vec4::ONE);

        // Same pixel count, different shape
        assert!(buffer.resize(3, 4));
        assert_eq!((buffer.width(), buffer.height()), (3, 4));
        assert_eq!(buffer.len(), 12);
        assert!(buffer.as_slice().iter().all(|v| *v == Vec4::ZERO));
    }

    #[test]
    fn test_clear() {
        let mut buffer = AccumulationBuffer::new(2, 2);
        buffer.as_mut_slice().fill(Vec4::splat(3.0));
        buffer.clear();
        assert!(buffer.as_slice().iter().all(|v| *v == Vec4::ZERO));
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_zero_area() {
        let buffer = AccumulationBuffer::new(0, 10);
        assert!(buffer.is_empty());
    }
}

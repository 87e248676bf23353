//! Little-endian wire codec shared by the envelope and every generated type.

pub use crate::error::wire::WireError;
pub use bytes::{Buf, BufMut};

/// A value with a fixed-size little-endian encoding.
pub trait Wire: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// The all-zero value.
    fn zeroed() -> Self;

    fn encode<B: BufMut>(&self, buf: &mut B);

    fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError>;
}

/// A packet body addressable by its type code.
pub trait Packet: Wire {
    const PKT_TYPE: u16;
    const NAME: &'static str;
}

#[track_caller]
pub fn ensure_remaining<B: Buf>(buf: &B, needed: usize, what: &str) -> Result<(), WireError> {
    if buf.remaining() < needed {
        return Err(WireError::truncated(format!(
            "{what} needs {needed} bytes, {} left",
            buf.remaining()
        )));
    }
    Ok(())
}

macro_rules! impl_wire_primitive {
    ($($ty:ty => $get:ident, $put:ident;)*) => {
        $(
            impl Wire for $ty {
                const SIZE: usize = size_of::<$ty>();

                fn zeroed() -> Self {
                    <$ty>::default()
                }

                fn encode<B: BufMut>(&self, buf: &mut B) {
                    buf.$put(*self);
                }

                fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError> {
                    ensure_remaining(buf, Self::SIZE, stringify!($ty))?;
                    Ok(buf.$get())
                }
            }
        )*
    };
}

impl_wire_primitive! {
    u8 => get_u8, put_u8;
    u16 => get_u16_le, put_u16_le;
    u32 => get_u32_le, put_u32_le;
    u64 => get_u64_le, put_u64_le;
    i8 => get_i8, put_i8;
    i16 => get_i16_le, put_i16_le;
    i32 => get_i32_le, put_i32_le;
    i64 => get_i64_le, put_i64_le;
    f32 => get_f32_le, put_f32_le;
    f64 => get_f64_le, put_f64_le;
}

impl Wire for bool {
    const SIZE: usize = 1;

    fn zeroed() -> Self {
        false
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u8(u8::from(*self));
    }

    fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError> {
        ensure_remaining(buf, Self::SIZE, "bool")?;
        Ok(buf.get_u8() != 0)
    }
}

impl<T: Wire, const N: usize> Wire for [T; N] {
    const SIZE: usize = T::SIZE * N;

    fn zeroed() -> Self {
        std::array::from_fn(|_| T::zeroed())
    }

    fn encode<B: BufMut>(&self, buf: &mut B) {
        for item in self {
            item.encode(buf);
        }
    }

    fn decode<B: Buf>(buf: &mut B) -> Result<Self, WireError> {
        ensure_remaining(buf, Self::SIZE, "array")?;
        let mut items = Self::zeroed();
        for item in items.iter_mut() {
            *item = T::decode(buf)?;
        }
        Ok(items)
    }
}

/// Text of a fixed-size, NUL-padded label field.
pub fn label_from_bytes(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// NUL-padded label field; text longer than `N` bytes is cut at a character
/// boundary.
pub fn label_to_bytes<const N: usize>(label: &str) -> [u8; N] {
    let mut bytes = [0u8; N];
    let mut end = label.len().min(N);
    while !label.is_char_boundary(end) {
        end -= 1;
    }
    bytes[..end].copy_from_slice(&label.as_bytes()[..end]);
    bytes
}

use alloc::string::String;
use alloc::vec::Vec;
use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use cm_reflect::info::{MemberKind, Primitive, PrimitiveKind};

use crate::codec::Tag;
use crate::{DeserializeError, MalformedStream};

/// Reads what a [`StreamWriter`] wrote, checking every byte it interprets.
///
/// End of input surfaces as [`MalformedStream::Truncated`].
///
/// [`StreamWriter`]: crate::codec::StreamWriter
pub struct StreamReader<R> {
    inner: R,
    max_length: u32,
}

impl<R: Read> StreamReader<R> {
    #[inline]
    pub fn new(inner: R, max_length: u32) -> Self {
        Self { inner, max_length }
    }

    #[inline]
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    #[inline]
    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn read_tag(&mut self) -> Result<Tag, DeserializeError> {
        let byte = self.inner.read_u8()?;
        Ok(Tag::try_from(byte)?)
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, DeserializeError> {
        Ok(self.inner.read_u32::<LittleEndian>()?)
    }

    /// Reads a length or count prefix, bounded by the configured limit.
    pub fn read_len(&mut self) -> Result<usize, DeserializeError> {
        let len = self.read_u32()?;
        if len > self.max_length {
            return Err(MalformedStream::LengthLimit {
                len,
                max: self.max_length,
            }
            .into());
        }
        Ok(len as usize)
    }

    /// Reads the payload of a primitive whose tag was already consumed.
    pub fn read_primitive(&mut self, kind: PrimitiveKind) -> Result<Primitive, DeserializeError> {
        let r = &mut self.inner;
        Ok(match kind {
            PrimitiveKind::Bool => match r.read_u8()? {
                0 => Primitive::Bool(false),
                1 => Primitive::Bool(true),
                other => return Err(MalformedStream::InvalidBool(other).into()),
            },
            PrimitiveKind::Char => {
                let scalar = r.read_u32::<LittleEndian>()?;
                match char::from_u32(scalar) {
                    Some(c) => Primitive::Char(c),
                    None => return Err(MalformedStream::InvalidChar(scalar).into()),
                }
            }
            PrimitiveKind::I8 => Primitive::I8(r.read_i8()?),
            PrimitiveKind::U8 => Primitive::U8(r.read_u8()?),
            PrimitiveKind::I16 => Primitive::I16(r.read_i16::<LittleEndian>()?),
            PrimitiveKind::U16 => Primitive::U16(r.read_u16::<LittleEndian>()?),
            PrimitiveKind::I32 => Primitive::I32(r.read_i32::<LittleEndian>()?),
            PrimitiveKind::U32 => Primitive::U32(r.read_u32::<LittleEndian>()?),
            PrimitiveKind::I64 => Primitive::I64(r.read_i64::<LittleEndian>()?),
            PrimitiveKind::U64 => Primitive::U64(r.read_u64::<LittleEndian>()?),
            PrimitiveKind::F32 => Primitive::F32(r.read_f32::<LittleEndian>()?),
            PrimitiveKind::F64 => Primitive::F64(r.read_f64::<LittleEndian>()?),
        })
    }

    /// Reads a length-prefixed UTF-8 string.
    pub fn read_str(&mut self) -> Result<String, DeserializeError> {
        let len = self.read_len()?;
        // `take` avoids allocating the whole claimed length for a short stream.
        let mut bytes = Vec::new();
        (&mut self.inner).take(len as u64).read_to_end(&mut bytes)?;
        if bytes.len() != len {
            return Err(MalformedStream::Truncated.into());
        }
        String::from_utf8(bytes).map_err(|_| MalformedStream::InvalidUtf8.into())
    }

    pub fn read_member_kind(&mut self) -> Result<MemberKind, DeserializeError> {
        match self.inner.read_u8()? {
            0 => Ok(MemberKind::Method),
            1 => Ok(MemberKind::Field),
            other => Err(MalformedStream::InvalidMemberKind(other).into()),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use cm_reflect::info::{MemberKind, Primitive, PrimitiveKind};

    use super::StreamReader;
    use crate::codec::{StreamWriter, Tag};
    use crate::{DeserializeError, MalformedStream};

    fn reader(bytes: &[u8]) -> StreamReader<Cursor<&[u8]>> {
        StreamReader::new(Cursor::new(bytes), 16)
    }

    fn malformed(err: DeserializeError) -> MalformedStream {
        match err {
            DeserializeError::Malformed(m) => m,
            other => panic!("expected a malformed stream, got {other}"),
        }
    }

    #[test]
    fn little_endian_layout() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.write_primitive(Primitive::I32(1337)).unwrap();
        writer.write_primitive(Primitive::Char('é')).unwrap();
        writer.write_str("ð!").unwrap();
        writer.write_member_kind(MemberKind::Field).unwrap();
        let bytes = writer.into_inner();

        assert_eq!(
            bytes,
            [
                Tag::I32 as u8, 0x39, 0x05, 0, 0, //
                Tag::Char as u8, 0xE9, 0, 0, 0, //
                3, 0, 0, 0, 0xC3, 0xB0, b'!', //
                1,
            ]
        );

        let mut r = reader(&bytes);
        assert_eq!(r.read_tag().unwrap(), Tag::I32);
        assert_eq!(r.read_primitive(PrimitiveKind::I32).unwrap(), Primitive::I32(1337));
        assert_eq!(r.read_tag().unwrap(), Tag::Char);
        assert_eq!(r.read_primitive(PrimitiveKind::Char).unwrap(), Primitive::Char('é'));
        assert_eq!(r.read_str().unwrap(), "ð!");
        assert_eq!(r.read_member_kind().unwrap(), MemberKind::Field);
    }

    #[test]
    fn rejects_inconsistent_bytes() {
        let err = reader(&[2]).read_primitive(PrimitiveKind::Bool).unwrap_err();
        assert_eq!(malformed(err), MalformedStream::InvalidBool(2));

        let err = reader(&[0x00, 0xD8, 0, 0]).read_primitive(PrimitiveKind::Char).unwrap_err();
        assert_eq!(malformed(err), MalformedStream::InvalidChar(0xD800));

        let err = reader(&[2, 0, 0, 0, 0xFF, 0xFE]).read_str().unwrap_err();
        assert_eq!(malformed(err), MalformedStream::InvalidUtf8);

        let err = reader(&[7]).read_member_kind().unwrap_err();
        assert_eq!(malformed(err), MalformedStream::InvalidMemberKind(7));

        let err = reader(&[99]).read_tag().unwrap_err();
        assert_eq!(malformed(err), MalformedStream::UnknownTag(99));
    }

    #[test]
    fn truncation_and_limits() {
        let err = reader(&[8, 0, 0, 0, b'a']).read_str().unwrap_err();
        assert_eq!(malformed(err), MalformedStream::Truncated);

        let err = reader(&[1, 0]).read_u32().unwrap_err();
        assert_eq!(malformed(err), MalformedStream::Truncated);

        let err = reader(&[17, 0, 0, 0]).read_len().unwrap_err();
        assert_eq!(malformed(err), MalformedStream::LengthLimit { len: 17, max: 16 });
    }
}

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use cm_reflect::info::{MemberKind, Primitive};

use crate::codec::Tag;

/// Writes tags, scalars and length-prefixed blocks to a byte sink.
///
/// Every multi-byte number is little-endian. Lengths, counts and
/// reference ids are `u32`.
pub struct StreamWriter<W> {
    inner: W,
}

impl<W: Write> StreamWriter<W> {
    #[inline]
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }

    #[inline]
    pub fn write_tag(&mut self, tag: Tag) -> io::Result<()> {
        self.inner.write_u8(tag as u8)
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.inner.write_u32::<LittleEndian>(value)
    }

    /// Writes a primitive with its tag.
    pub fn write_primitive(&mut self, value: Primitive) -> io::Result<()> {
        self.write_tag(Tag::primitive(value.kind()))?;
        match value {
            Primitive::Bool(v) => self.inner.write_u8(u8::from(v)),
            Primitive::Char(v) => self.inner.write_u32::<LittleEndian>(u32::from(v)),
            Primitive::I8(v) => self.inner.write_i8(v),
            Primitive::U8(v) => self.inner.write_u8(v),
            Primitive::I16(v) => self.inner.write_i16::<LittleEndian>(v),
            Primitive::U16(v) => self.inner.write_u16::<LittleEndian>(v),
            Primitive::I32(v) => self.inner.write_i32::<LittleEndian>(v),
            Primitive::U32(v) => self.inner.write_u32::<LittleEndian>(v),
            Primitive::I64(v) => self.inner.write_i64::<LittleEndian>(v),
            Primitive::U64(v) => self.inner.write_u64::<LittleEndian>(v),
            Primitive::F32(v) => self.inner.write_f32::<LittleEndian>(v),
            Primitive::F64(v) => self.inner.write_f64::<LittleEndian>(v),
        }
    }

    /// Writes a `u32` byte length followed by the UTF-8 bytes.
    ///
    /// The caller has checked the length against its limit.
    pub fn write_str(&mut self, value: &str) -> io::Result<()> {
        self.write_u32(value.len() as u32)?;
        self.inner.write_all(value.as_bytes())
    }

    #[inline]
    pub fn write_member_kind(&mut self, kind: MemberKind) -> io::Result<()> {
        self.inner.write_u8(match kind {
            MemberKind::Method => 0,
            MemberKind::Field => 1,
        })
    }

    #[inline]
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

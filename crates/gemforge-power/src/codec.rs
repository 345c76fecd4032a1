//! Persistent and network encodings of [`GemPowerComponent`]
//!
//! Persistent: a record with four named fields, powers stored by identifier.
//! Network: `bool, bool, VarInt, VarInt`, powers stored by registry raw id.

use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};
use gemforge_core::Identifier;
use serde::{Deserialize, Serialize};

use crate::component::GemPowerComponent;
use crate::error::CodecError;
use crate::registry::{PowerEntry, PowerRegistry};

/// Save-format form of a power component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemPowerRecord {
    pub has_runic_power: bool,
    pub has_nether_power: bool,
    pub runic_power: Identifier,
    pub nether_power: Identifier,
}

fn resolve(registry: &PowerRegistry, key: &Identifier) -> Result<PowerEntry, CodecError> {
    registry
        .get(key)
        .ok_or_else(|| CodecError::UnknownPower(key.clone()))
}

fn resolve_raw(registry: &PowerRegistry, raw_id: i32) -> Result<PowerEntry, CodecError> {
    u32::try_from(raw_id)
        .ok()
        .and_then(|id| registry.by_raw_id(id))
        .ok_or(CodecError::UnknownRawId(raw_id))
}

impl GemPowerComponent {
    pub fn to_record(&self) -> GemPowerRecord {
        GemPowerRecord {
            has_runic_power: self.has_runic_power(),
            has_nether_power: self.has_nether_power(),
            runic_power: self.runic_power().key().clone(),
            nether_power: self.nether_power().key().clone(),
        }
    }

    /// Rebuild a component, resolving both identifiers against `registry`
    pub fn from_record(record: &GemPowerRecord, registry: &PowerRegistry) -> Result<Self, CodecError> {
        Ok(Self::new(
            record.has_runic_power,
            record.has_nether_power,
            resolve(registry, &record.runic_power)?,
            resolve(registry, &record.nether_power)?,
        ))
    }

    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    pub fn from_json(json: &str, registry: &PowerRegistry) -> Result<Self, CodecError> {
        let record: GemPowerRecord = serde_json::from_str(json)?;
        Self::from_record(&record, registry)
    }

    /// Write the network form
    pub fn encode<W: Write>(&self, writer: &mut W) -> Result<(), CodecError> {
        writer.write_u8(self.has_runic_power() as u8)?;
        writer.write_u8(self.has_nether_power() as u8)?;
        write_varint(writer, self.runic_power().raw_id() as i32)?;
        write_varint(writer, self.nether_power().raw_id() as i32)?;
        Ok(())
    }

    /// Read the network form, resolving raw ids against `registry`
    pub fn decode<R: Read>(reader: &mut R, registry: &PowerRegistry) -> Result<Self, CodecError> {
        let has_runic_power = reader.read_u8()? != 0;
        let has_nether_power = reader.read_u8()? != 0;
        let runic_power = resolve_raw(registry, read_varint(reader)?)?;
        let nether_power = resolve_raw(registry, read_varint(reader)?)?;
        Ok(Self::new(has_runic_power, has_nether_power, runic_power, nether_power))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::with_capacity(4);
        self.encode(&mut buf)?;
        Ok(buf)
    }
}

pub fn read_varint<R: Read>(reader: &mut R) -> Result<i32, CodecError> {
    let mut result = 0i32;
    let mut shift = 0;
    loop {
        let byte = reader.read_u8()?;
        result |= ((byte & 0x7F) as i32) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
        if shift >= 32 {
            return Err(CodecError::VarIntTooLarge);
        }
    }
    Ok(result)
}

pub fn write_varint<W: Write>(writer: &mut W, mut value: i32) -> Result<(), CodecError> {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value = ((value as u32) >> 7) as i32;
        if value != 0 {
            byte |= 0x80;
        }
        writer.write_u8(byte)?;
        if value == 0 {
            break;
        }
    }
    Ok(())
}

use std::net::Ipv4Addr;
use std::slice::Iter;

use crate::domain_name::{DomainName, LabelSequenceParser};
use crate::error::{DNSResolverError, Result};
use crate::rr_types::RRType;
use crate::utils;

// RecordData is the decoded rdata of a resource record. Only the types
// this client reports on are decoded, everything else keeps its type code.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordData {
    A(Ipv4Addr),
    CName(DomainName),
    Other(u16),
}

#[derive(Debug, Clone)]
pub struct DNSRecord {
    name: DomainName,
    r_type: u16,
    class: u16,
    ttl: u32,
    data: RecordData,
}

impl DNSRecord {
    pub fn name(&self) -> &DomainName {
        &self.name
    }

    pub fn r_type(&self) -> u16 {
        self.r_type
    }

    pub fn class(&self) -> u16 {
        self.class
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn data(&self) -> &RecordData {
        &self.data
    }

    pub fn decode<'a>(iter: &mut Iter<'a, u8>, message: &'a [u8]) -> Result<DNSRecord> {
        let name = LabelSequenceParser::new(message).construct_domain_name(iter)?;

        let parts = utils::u8_bytes_to_u16_vec(iter, 2)?;
        let r_type = parts[0];
        let class = parts[1];
        let ttl = utils::u8_bytes_to_u32(iter)?;
        let rd_len = usize::from(utils::u8_bytes_to_u16_vec(iter, 1)?[0]);

        // rdata may hold compressed names, so keep a view of it that is
        // still a suffix of the message.
        let mut rdata_iter = iter.clone();
        let raw = utils::take_exact(iter, rd_len, "rr")?;
        let data = Self::parse_raw_data(r_type, &raw, &mut rdata_iter, message)?;

        Ok(DNSRecord {
            name,
            r_type,
            class,
            ttl,
            data,
        })
    }

    fn parse_raw_data<'a>(
        r_type: u16,
        raw: &[u8],
        rdata_iter: &mut Iter<'a, u8>,
        message: &'a [u8],
    ) -> Result<RecordData> {
        match RRType::try_from(r_type) {
            Ok(RRType::A) => {
                let octets: [u8; 4] = raw.try_into().map_err(|_| {
                    DNSResolverError::Decode(
                        String::from("rr"),
                        format!("A record data has {} bytes", raw.len()),
                    )
                })?;
                Ok(RecordData::A(Ipv4Addr::from(octets)))
            }
            Ok(RRType::CNAME) => {
                let before = rdata_iter.len();
                let target = LabelSequenceParser::new(message).construct_domain_name(rdata_iter)?;
                // the name must end exactly where the record data ends
                let used = before - rdata_iter.len();
                if used != raw.len() {
                    return Err(DNSResolverError::Decode(
                        String::from("rr"),
                        format!("CNAME name spans {} bytes of {} bytes of record data", used, raw.len()),
                    ));
                }
                Ok(RecordData::CName(target))
            }
            _ => Ok(RecordData::Other(r_type)),
        }
    }
}

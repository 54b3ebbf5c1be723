//! Record walker (§4.3): FSPEC expansion and per-record FRN dispatch.

use tracing::{trace, warn};

use crate::asterix::error::{DecodeError, DecodeOutcome, DecodeResult};
use crate::asterix::item::{ItemDescriptor, ItemKind};

/// A category's User Application Profile: FRN `n` resolves to `slots[n - 1]`. `None` means the
/// slot is undefined for the active reference version (distinct from "FRN past the table",
/// which is [`DecodeError::FrnOutOfRange`]).
pub struct Uap<Ctx> {
    pub version: String,
    pub max_fspec_octets: usize,
    pub slots: Vec<Option<ItemDescriptor<Ctx>>>,
}

impl<Ctx> Uap<Ctx> {
    /// Decode the item at FRN `frn` (1-based). Exposed so RFS/SPF handlers can recurse into the
    /// same UAP for each embedded FRN+item pair (§4.3).
    pub fn decode_frn(
        &self,
        category: u8,
        frn: usize,
        payload: &[u8],
        pos: &mut usize,
        ctx: &mut Ctx,
    ) -> DecodeResult<()> {
        let idx = frn.checked_sub(1).ok_or(DecodeError::FrnOutOfRange { category, frn })?;
        let slot = self
            .slots
            .get(idx)
            .ok_or(DecodeError::FrnOutOfRange { category, frn })?;
        let descriptor = slot.as_ref().ok_or_else(|| DecodeError::UndefinedUapSlot {
            category,
            frn,
            version: self.version.clone(),
        })?;
        if let ItemKind::Rfs = descriptor.kind {
            return self.decode_rfs(category, payload, pos, ctx);
        }
        descriptor.decode(payload, pos, ctx)
    }

    /// A Random Field Sequence: `n` then `n` `(FRN, item)` pairs, each FRN re-entering this
    /// same UAP (§4.3's RFS/SPF convention, shared by every category that carries one).
    fn decode_rfs(
        &self,
        category: u8,
        payload: &[u8],
        pos: &mut usize,
        ctx: &mut Ctx,
    ) -> DecodeResult<()> {
        if *pos >= payload.len() {
            return Err(DecodeError::TruncatedItem { need: 1, have: 0 });
        }
        let n = payload[*pos] as usize;
        *pos += 1;
        if n == 0 {
            return Err(DecodeError::InvalidRepeat { category, item: 0 });
        }
        for _ in 0..n {
            if *pos >= payload.len() {
                return Err(DecodeError::TruncatedItem { need: 1, have: 0 });
            }
            let frn = payload[*pos] as usize;
            *pos += 1;
            self.decode_frn(category, frn, payload, pos, ctx)?;
        }
        Ok(())
    }
}

/// Walk every record in `payload` (one ASTERIX data block's worth), delivering each fully
/// decoded context to `on_record`. `new_ctx` builds a fresh, empty context per record.
///
/// `on_record`'s [`DecodeOutcome`] return propagates per §4.3 step 2e: `Okay`/`Skip` continue,
/// `Done` stops cleanly, `Fatal` unwinds to the caller.
pub fn walk_records<Ctx>(
    category: u8,
    payload: &[u8],
    uap: &Uap<Ctx>,
    mut new_ctx: impl FnMut() -> Ctx,
    mut on_record: impl FnMut(Ctx) -> DecodeOutcome,
) -> DecodeResult<()> {
    let mut pos = 0usize;
    while pos < payload.len() {
        let mut ctx = new_ctx();
        let mut frns: Vec<usize> = Vec::new();
        let mut frn_counter = 0usize;
        let mut fspec_octets = 0usize;

        loop {
            if fspec_octets >= uap.max_fspec_octets {
                return Err(DecodeError::FspecTooLong {
                    category,
                    max: uap.max_fspec_octets,
                });
            }
            if pos >= payload.len() {
                return Err(DecodeError::TruncatedItem {
                    need: 1,
                    have: 0,
                });
            }
            let octet = payload[pos];
            pos += 1;
            fspec_octets += 1;
            for bit in (1..8).rev() {
                frn_counter += 1;
                if octet & (1 << bit) != 0 {
                    frns.push(frn_counter);
                }
            }
            if octet & 0x01 == 0 {
                break;
            }
        }

        if frns.is_empty() {
            warn!(category, "empty record (FSPEC all zero), skipping");
            continue;
        }

        trace!(category, frns = ?frns, "record FSPEC decoded");
        for frn in frns {
            uap.decode_frn(category, frn, payload, &mut pos, &mut ctx)?;
        }

        match on_record(ctx) {
            DecodeOutcome::Okay | DecodeOutcome::Skip => continue,
            DecodeOutcome::Done => return Ok(()),
            DecodeOutcome::Fatal(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asterix::item::ItemKind;

    #[derive(Default, Debug)]
    struct Ctx {
        values: Vec<u8>,
    }

    fn store_one(slice: &[u8], ctx: &mut Ctx) -> DecodeResult<()> {
        ctx.values.push(slice[0]);
        Ok(())
    }

    fn make_uap() -> Uap<Ctx> {
        Uap {
            version: "test".to_string(),
            max_fspec_octets: 2,
            slots: vec![
                Some(ItemDescriptor {
                    category: 1,
                    item: 10,
                    kind: ItemKind::Fixed { len: 1, handler: store_one },
                }),
                Some(ItemDescriptor {
                    category: 1,
                    item: 20,
                    kind: ItemKind::Fixed { len: 1, handler: store_one },
                }),
                None,
            ],
        }
    }

    #[test]
    fn test_single_record_two_items() {
        let uap = make_uap();
        // FSPEC octet 0xC0 = bits 1,2 set (FRN 1, FRN 2), FX clear.
        let payload = [0xC0, 0xAA, 0xBB];
        let mut results = Vec::new();
        walk_records(1, &payload, &uap, Ctx::default, |ctx| {
            results.push(ctx.values);
            DecodeOutcome::Okay
        })
        .unwrap();
        assert_eq!(results, vec![vec![0xAA, 0xBB]]);
    }

    #[test]
    fn test_empty_record_is_skipped_not_delivered() {
        let uap = make_uap();
        let payload = [0x00];
        let mut delivered = 0;
        walk_records(1, &payload, &uap, Ctx::default, |_| {
            delivered += 1;
            DecodeOutcome::Okay
        })
        .unwrap();
        assert_eq!(delivered, 0);
    }

    #[test]
    fn test_undefined_uap_slot_errors() {
        let uap = make_uap();
        // FRN 3 (bit 0 of first octet, after the two data bits) is None in our fixture.
        let payload = [0xA0, 0xAA];
        let result = walk_records(1, &payload, &uap, Ctx::default, |_| DecodeOutcome::Okay);
        assert!(matches!(result, Err(DecodeError::UndefinedUapSlot { .. })));
    }

    #[test]
    fn test_rfs_recurses_into_named_frns() {
        let mut uap = make_uap();
        uap.slots.push(Some(ItemDescriptor { category: 1, item: 21, kind: ItemKind::Rfs }));
        // RFS (FRN 4) carries n=2 pairs: (FRN1, 0xEE), (FRN2, 0xFF).
        let payload = [0b0001_0000, 0x02, 0x01, 0xEE, 0x02, 0xFF];
        let mut results = Vec::new();
        walk_records(1, &payload, &uap, Ctx::default, |ctx| {
            results.push(ctx.values);
            DecodeOutcome::Okay
        })
        .unwrap();
        assert_eq!(results, vec![vec![0xEE, 0xFF]]);
    }

    #[test]
    fn test_fatal_outcome_stops_walker() {
        let uap = make_uap();
        let mut payload = vec![0xC0, 0xAA, 0xBB];
        payload.extend_from_slice(&[0xC0, 0xCC, 0xDD]);
        let mut delivered = 0;
        let result = walk_records(1, &payload, &uap, Ctx::default, |_| {
            delivered += 1;
            DecodeOutcome::Fatal(DecodeError::EmptyRecord { category: 1 })
        });
        assert_eq!(delivered, 1);
        assert!(result.is_err());
    }
}

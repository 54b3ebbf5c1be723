//! Data-item engine (§4.4).
//!
//! Resolves one item's length per its kind and hands a bounds-checked sub-slice to the item's
//! handler. `Ctx` is whatever normalised object the category is building (`RadarTarget`, `Adsb`,
//! ...); handlers are plain function pointers since the set is fixed at compile time per
//! category and there is no need for dynamic dispatch.

use crate::asterix::error::{DecodeError, DecodeResult};

/// A FIXED/EXTENDED/REPETITIVE handler: given the item's own bounds-checked slice, update `ctx`.
pub type ItemHandler<Ctx> = fn(&[u8], &mut Ctx) -> DecodeResult<()>;

/// A COMPOUND/IMMEDIATE handler: given the remaining record slice starting at the item, advance
/// `consumed` past the bytes it used and update `ctx`. Used for variable-subfield items like
/// I021/295 (Data Ages) and I021/220 (Met Info) that carry their own presence bitmap.
pub type VariableHandler<Ctx> = fn(&[u8], &mut usize, &mut Ctx) -> DecodeResult<()>;

/// How a data item's length is resolved (§4.4).
pub enum ItemKind<Ctx> {
    /// A fixed-width item of `len` bytes.
    Fixed { len: usize, handler: ItemHandler<Ctx> },
    /// Octets continue while each one's low bit (FX) is set.
    Extended { handler: ItemHandler<Ctx> },
    /// A leading repetition count `rep`, followed by `rep * unit_len` bytes.
    Repetitive { unit_len: usize, handler: ItemHandler<Ctx> },
    /// Handler manages its own internal length logic.
    Compound { handler: VariableHandler<Ctx> },
    /// Handler manages its own internal length logic (SPF and similar opaque items).
    Immediate { handler: VariableHandler<Ctx> },
    /// A Random Field Sequence: a leading repeat count `n`, followed by `n` `(FRN, item)` pairs
    /// re-entering the owning UAP by FRN. Handled directly by [`crate::asterix::walker::Uap`]
    /// since recursion needs the UAP table itself, not just the current context.
    Rfs,
}

/// A UAP slot: which category/item this is (for diagnostics) plus how to decode it.
pub struct ItemDescriptor<Ctx> {
    pub category: u8,
    pub item: u16,
    pub kind: ItemKind<Ctx>,
}

impl<Ctx> ItemDescriptor<Ctx> {
    /// Decode this item out of `payload` starting at `*pos`, advancing `*pos` past it.
    pub fn decode(&self, payload: &[u8], pos: &mut usize, ctx: &mut Ctx) -> DecodeResult<()> {
        match &self.kind {
            ItemKind::Fixed { len, handler } => {
                let start = *pos;
                let end = start
                    .checked_add(*len)
                    .filter(|&e| e <= payload.len())
                    .ok_or(DecodeError::TruncatedItem {
                        need: *len,
                        have: payload.len().saturating_sub(start),
                    })?;
                handler(&payload[start..end], ctx)?;
                *pos = end;
                Ok(())
            }
            ItemKind::Extended { handler } => {
                let start = *pos;
                let mut end = start;
                loop {
                    if end >= payload.len() {
                        return Err(DecodeError::TruncatedItem {
                            need: end - start + 1,
                            have: payload.len() - start,
                        });
                    }
                    let continues = payload[end] & 0x01 != 0;
                    end += 1;
                    if !continues {
                        break;
                    }
                }
                handler(&payload[start..end], ctx)?;
                *pos = end;
                Ok(())
            }
            ItemKind::Repetitive { unit_len, handler } => {
                let start = *pos;
                if start >= payload.len() {
                    return Err(DecodeError::TruncatedItem {
                        need: 1,
                        have: 0,
                    });
                }
                let rep = payload[start] as usize;
                if rep == 0 {
                    return Err(DecodeError::InvalidRepeat {
                        category: self.category,
                        item: self.item,
                    });
                }
                let total = 1 + rep * unit_len;
                let end = start
                    .checked_add(total)
                    .filter(|&e| e <= payload.len())
                    .ok_or(DecodeError::TruncatedItem {
                        need: total,
                        have: payload.len().saturating_sub(start),
                    })?;
                handler(&payload[start..end], ctx)?;
                *pos = end;
                Ok(())
            }
            ItemKind::Compound { handler } | ItemKind::Immediate { handler } => {
                let remaining = &payload[*pos..];
                let mut consumed = 0usize;
                handler(remaining, &mut consumed, ctx)?;
                *pos += consumed;
                Ok(())
            }
            ItemKind::Rfs => Err(DecodeError::RfsOutsideUap {
                category: self.category,
                item: self.item,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Ctx {
        seen: Vec<u8>,
    }

    fn remember(slice: &[u8], ctx: &mut Ctx) -> DecodeResult<()> {
        ctx.seen.extend_from_slice(slice);
        Ok(())
    }

    fn remember_variable(slice: &[u8], consumed: &mut usize, ctx: &mut Ctx) -> DecodeResult<()> {
        ctx.seen.push(slice[0]);
        *consumed = 1;
        Ok(())
    }

    #[test]
    fn test_fixed_item_advances_pos() {
        let d: ItemDescriptor<Ctx> = ItemDescriptor {
            category: 48,
            item: 10,
            kind: ItemKind::Fixed { len: 2, handler: remember },
        };
        let payload = [0x01, 0x02, 0x03];
        let mut pos = 0;
        let mut ctx = Ctx::default();
        d.decode(&payload, &mut pos, &mut ctx).unwrap();
        assert_eq!(pos, 2);
        assert_eq!(ctx.seen, vec![0x01, 0x02]);
    }

    #[test]
    fn test_fixed_item_truncated() {
        let d: ItemDescriptor<Ctx> = ItemDescriptor {
            category: 48,
            item: 10,
            kind: ItemKind::Fixed { len: 4, handler: remember },
        };
        let payload = [0x01, 0x02];
        let mut pos = 0;
        let mut ctx = Ctx::default();
        assert!(matches!(
            d.decode(&payload, &mut pos, &mut ctx),
            Err(DecodeError::TruncatedItem { .. })
        ));
    }

    #[test]
    fn test_extended_item_stops_at_fx_zero() {
        let d: ItemDescriptor<Ctx> = ItemDescriptor {
            category: 21,
            item: 40,
            kind: ItemKind::Extended { handler: remember },
        };
        let payload = [0x03, 0x05, 0x00, 0xff];
        let mut pos = 0;
        let mut ctx = Ctx::default();
        d.decode(&payload, &mut pos, &mut ctx).unwrap();
        assert_eq!(pos, 3);
        assert_eq!(ctx.seen, vec![0x03, 0x05, 0x00]);
    }

    #[test]
    fn test_repetitive_item_zero_rejected() {
        let d: ItemDescriptor<Ctx> = ItemDescriptor {
            category: 48,
            item: 130,
            kind: ItemKind::Repetitive { unit_len: 2, handler: remember },
        };
        let payload = [0x00, 0xaa, 0xbb];
        let mut pos = 0;
        let mut ctx = Ctx::default();
        assert!(matches!(
            d.decode(&payload, &mut pos, &mut ctx),
            Err(DecodeError::InvalidRepeat { .. })
        ));
    }

    #[test]
    fn test_repetitive_item_consumes_all_units() {
        let d: ItemDescriptor<Ctx> = ItemDescriptor {
            category: 48,
            item: 130,
            kind: ItemKind::Repetitive { unit_len: 2, handler: remember },
        };
        let payload = [0x02, 0xaa, 0xbb, 0xcc, 0xdd];
        let mut pos = 0;
        let mut ctx = Ctx::default();
        d.decode(&payload, &mut pos, &mut ctx).unwrap();
        assert_eq!(pos, 5);
        assert_eq!(ctx.seen, vec![0x02, 0xaa, 0xbb, 0xcc, 0xdd]);
    }

    #[test]
    fn test_immediate_item_uses_own_length() {
        let d: ItemDescriptor<Ctx> = ItemDescriptor {
            category: 21,
            item: 250,
            kind: ItemKind::Immediate { handler: remember_variable },
        };
        let payload = [0x07, 0x08];
        let mut pos = 0;
        let mut ctx = Ctx::default();
        d.decode(&payload, &mut pos, &mut ctx).unwrap();
        assert_eq!(pos, 1);
        assert_eq!(ctx.seen, vec![0x07]);
    }
}

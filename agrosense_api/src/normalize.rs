//! Reconciles the three list payload shapes into one [`Paginated`] result.

use crate::types::{ListPayload, PageRequest, Paginated, PaginationMeta, PartialMeta};

/// Number of pages needed for `total` items, never less than 1.
///
/// A `per_page` of 0 is treated as 1.
pub fn last_page_for(total: u64, per_page: u64) -> u64 {
    total.div_ceil(per_page.max(1)).max(1)
}

/// Normalizes a decoded list payload.
///
/// Server-supplied pagination always wins; `fallback` fills whatever the
/// payload leaves out. A length-aware page is copied verbatim. A resource
/// envelope is completed field by field from its `meta`, then from counters
/// beside `data`, then from `fallback`. A raw array is paginated entirely
/// from `fallback`.
pub fn normalize<T>(raw: ListPayload<T>, fallback: PageRequest) -> Paginated<T> {
    match raw {
        ListPayload::LengthAwarePage {
            data,
            current_page,
            per_page,
            total,
            last_page,
        } => Paginated {
            items: data,
            meta: PaginationMeta {
                current_page,
                per_page,
                total,
                last_page,
            },
        },
        ListPayload::ResourceEnvelope { data, meta, top } => {
            let meta = meta.unwrap_or_default().or(top);
            let meta = complete_meta(meta, data.len() as u64, fallback);
            Paginated { items: data, meta }
        }
        ListPayload::RawArray(data) => {
            let total = data.len() as u64;
            Paginated {
                items: data,
                meta: PaginationMeta {
                    current_page: fallback.page,
                    per_page: fallback.per_page,
                    total,
                    last_page: last_page_for(total, fallback.per_page),
                },
            }
        }
    }
}

fn complete_meta(meta: PartialMeta, item_count: u64, fallback: PageRequest) -> PaginationMeta {
    let per_page = meta.per_page.unwrap_or(fallback.per_page);
    let total = meta.total.unwrap_or(item_count);
    PaginationMeta {
        current_page: meta.current_page.unwrap_or(fallback.page),
        per_page,
        total,
        last_page: meta
            .last_page
            .unwrap_or_else(|| last_page_for(total, per_page)),
    }
}

use crate::domain::PhoneKey;
use crate::index::PhoneIndex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchOrder {
    #[default]
    Lexicographic,
    SdrFirstSeen,
}

pub fn matched_keys<A, B>(
    sdr: &PhoneIndex<A>,
    orders: &PhoneIndex<B>,
    order: MatchOrder,
) -> Vec<PhoneKey> {
    match order {
        MatchOrder::Lexicographic => sdr
            .keys()
            .filter(|key| orders.contains(key))
            .cloned()
            .collect(),
        MatchOrder::SdrFirstSeen => sdr
            .first_seen()
            .iter()
            .filter(|key| orders.contains(key))
            .cloned()
            .collect(),
    }
}

use cw_storage_plus::Item;

pub const DEPLOYMENT_COUNT: Item<u64> = Item::new("deployment_count");

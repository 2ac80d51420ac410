use cw_storage_plus::Item;

use crate::msg::CallRecord;

pub const LAST_RECORD: Item<CallRecord> = Item::new("last_record");

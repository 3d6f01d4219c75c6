use anyhow::{Result, bail};
use giftlist_core::{GiftId, GiftList};

pub fn run(list: &mut GiftList, id: GiftId) -> Result<()> {
    if !list.remove(id) {
        bail!("No gift with id {}", id);
    }
    Ok(())
}

//! The table owns the pager and the root page number, and hosts the two
//! access methods (insert, scan) that drive a cursor across the leaf root.
//!
//! Splitting a full leaf into an internal node is explicitly out of scope:
//! `insert_row` returns `Error::TableFull` instead of growing the tree.

use std::path::Path;

use crate::cursor::Cursor;
use crate::errors::Error;
use crate::node::{self, LEAF_NODE_MAX_CELLS};
use crate::pager::Pager;
use crate::row::Row;

pub struct Table {
    pub root_page_num: u32,
    pub pager: Pager,
}

impl Table {
    pub fn open(path: impl AsRef<Path>) -> Result<Table, Error> {
        let mut pager = Pager::open(path)?;
        if pager.num_pages == 0 {
            let root = pager.get_page(0)?;
            node::init_leaf(root);
            node::set_is_root(root, true);
            tracing::debug!("initialized empty leaf root");
        }
        Ok(Table {
            root_page_num: 0,
            pager,
        })
    }

    /// Flushes every resident page and drops the pager, closing the file.
    /// Only pages touched this session can have changed, so only those are
    /// written back.
    pub fn close(mut self) -> Result<(), Error> {
        for page_num in 0..self.pager.num_pages {
            if self.pager.is_resident(page_num) {
                self.pager.flush(page_num)?;
            }
        }
        tracing::debug!("table closed cleanly");
        Ok(())
    }

    pub fn insert_row(&mut self, row: &Row) -> Result<(), Error> {
        let root_page_num = self.root_page_num;
        let num_cells = {
            let page = self.pager.get_page(root_page_num)?;
            node::num_cells(page)
        };
        if num_cells as usize >= LEAF_NODE_MAX_CELLS {
            return Err(Error::TableFull);
        }

        let mut cursor = Cursor::find(self, row.id)?;
        let cell_num = cursor.cell_num;

        if cell_num < num_cells {
            let existing_key = {
                let page = cursor.page()?;
                node::key(page, cell_num as usize)?
            };
            if existing_key == row.id {
                return Err(Error::DuplicateKey);
            }
        }

        // Shift cells [cell_num, num_cells) right by one, back to front, to
        // make room without overlap corruption.
        {
            let page = cursor.page()?;
            let mut i = num_cells;
            while i > cell_num {
                node::copy_cell(page, (i - 1) as usize, i as usize)?;
                i -= 1;
            }
            node::set_num_cells(page, num_cells + 1);
        }

        let page = cursor.page()?;
        node::set_key(page, cell_num as usize, row.id)?;
        row.serialize(node::value_mut(page, cell_num as usize)?);

        tracing::debug!(id = row.id, "row inserted");
        Ok(())
    }

    pub fn select_rows(&mut self) -> Result<Vec<Row>, Error> {
        let mut rows = Vec::new();
        let mut cursor = Cursor::begin(self)?;
        while !cursor.end_of_table {
            rows.push(Row::deserialize(cursor.value()?));
            cursor.advance()?;
        }
        Ok(rows)
    }
}

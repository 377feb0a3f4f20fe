//! A cursor is a positioned reference into the table: a (page, cell)
//! location plus an end-of-table flag. Keeping insert/scan behind this
//! abstraction means a future internal-node `find` wouldn't change either
//! access method, only how the cursor is produced.

use crate::errors::Error;
use crate::node;
use crate::table::Table;

pub struct Cursor<'a> {
    table: &'a mut Table,
    pub page_num: u32,
    pub cell_num: u32,
    pub end_of_table: bool,
}

impl<'a> Cursor<'a> {
    pub fn begin(table: &'a mut Table) -> Result<Cursor<'a>, Error> {
        let root_page_num = table.root_page_num;
        let page = table.pager.get_page(root_page_num)?;
        let num_cells = node::num_cells(page);
        Ok(Cursor {
            table,
            page_num: root_page_num,
            cell_num: 0,
            end_of_table: num_cells == 0,
        })
    }

    /// Returns a cursor at the cell matching `key`, or at the position where
    /// it would need to be inserted to keep cells sorted.
    pub fn find(table: &'a mut Table, key: u32) -> Result<Cursor<'a>, Error> {
        let root_page_num = table.root_page_num;
        let page = table.pager.get_page(root_page_num)?;
        if node::node_type(page)? != node::NodeType::Leaf {
            return Err(Error::Fatal(
                "descending into an internal node is not implemented".into(),
            ));
        }

        let num_cells = node::num_cells(page);
        let mut min_index = 0u32;
        let mut one_past_max_index = num_cells;
        while min_index < one_past_max_index {
            let mid = (min_index + one_past_max_index) / 2;
            let key_at_mid = node::key(page, mid as usize)?;
            match key_at_mid.cmp(&key) {
                std::cmp::Ordering::Equal => {
                    return Ok(Cursor {
                        table,
                        page_num: root_page_num,
                        cell_num: mid,
                        end_of_table: false,
                    });
                }
                std::cmp::Ordering::Greater => one_past_max_index = mid,
                std::cmp::Ordering::Less => min_index = mid + 1,
            }
        }

        Ok(Cursor {
            table,
            page_num: root_page_num,
            cell_num: min_index,
            end_of_table: false,
        })
    }

    pub fn advance(&mut self) -> Result<(), Error> {
        let page = self.table.pager.get_page(self.page_num)?;
        self.cell_num += 1;
        if self.cell_num >= node::num_cells(page) {
            self.end_of_table = true;
        }
        Ok(())
    }

    pub fn value(&mut self) -> Result<&[u8], Error> {
        let page = self.table.pager.get_page(self.page_num)?;
        node::value(page, self.cell_num as usize)
    }

    pub fn page(&mut self) -> Result<&mut node::Page, Error> {
        self.table.pager.get_page(self.page_num)
    }
}

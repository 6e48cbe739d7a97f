//! Type variants.
//!
//! Element and member types recurse into narrower categories: vectors
//! into scalars, arrays into scalars and vectors, structs into anything
//! but structs. Nesting therefore stays finite and `base_type` always
//! reaches a scalar.

use spvs_ir::{Category, GlobalId, OpKind, TypeData};
use tracing::trace;

use super::Generator;
use crate::context::NumericKind;
use crate::error::{produce, require, GenResult, Outcome};

impl Generator {
    /// Produce an interned type of `category`.
    pub fn generate_type(&mut self, category: Category) -> GenResult<GlobalId> {
        self.delegate(category, |g, kind| g.type_variant(kind))
    }

    fn type_variant(&mut self, kind: OpKind) -> GenResult<GlobalId> {
        let data = match kind {
            OpKind::TypeBool => TypeData::Bool,
            OpKind::TypeInt => {
                let widths = self.config().int_widths();
                let width = require!(self.pick(&widths));
                let signed = self.session.chance(0.5);
                TypeData::Int { width, signed }
            }
            OpKind::TypeFloat => {
                let widths = self.config().float_widths();
                TypeData::Float {
                    width: require!(self.pick(&widths)),
                }
            }
            OpKind::TypeVector => {
                let element = produce!(self.generate_type(Category::ScalarType));
                TypeData::Vector {
                    element,
                    count: self.range(2, 4),
                }
            }
            OpKind::TypeMatrix => {
                let widths = self.config().float_widths();
                let width = require!(self.pick(&widths));
                let float = self.ctx.add_to_global_table(TypeData::Float { width }).id;
                let rows = self.range(2, 4);
                let column = self
                    .ctx
                    .add_to_global_table(TypeData::Vector {
                        element: float,
                        count: rows,
                    })
                    .id;
                TypeData::Matrix {
                    column,
                    count: self.range(2, 4),
                }
            }
            OpKind::TypeArray => {
                let element = produce!(self.generate_type(Category::ArrayElementType));
                let len = self.range(1, 8);
                let length = self.ctx.create_on_demand_numeric_constant(
                    NumericKind::Int { signed: false },
                    spvs_ir::LitValue::UInt(u64::from(len)),
                    32,
                );
                TypeData::Array { element, length }
            }
            OpKind::TypeStruct => {
                let n = self.range(1, 4);
                let mut members = Vec::with_capacity(n as usize);
                for _ in 0..n {
                    members.push(produce!(self.generate_type(Category::StructMemberType)));
                }
                TypeData::Struct { members }
            }
            OpKind::TypeFunction => {
                if self.function_types.len() >= self.config().max_functions {
                    return Ok(Outcome::Infeasible);
                }
                let ret = self.ctx.module.void_type();
                let n = self.range(0, 3);
                let mut params = Vec::with_capacity(n as usize);
                for _ in 0..n {
                    params.push(produce!(self.generate_type(Category::ArithmeticType)));
                }
                TypeData::Function { ret, params }
            }
            _ => return Ok(Outcome::Infeasible),
        };

        let interned = self.ctx.add_to_global_table(data);
        trace!(%kind, id = interned.id.raw(), inserted = interned.inserted, "type");

        if kind == OpKind::TypeFunction {
            self.function_types.push(interned.id);
            if self.function_types.len() >= self.config().max_functions {
                self.session
                    .set_zero_probability(Category::Type, OpKind::TypeFunction);
            }
        }
        Ok(Outcome::Produced(interned.id))
    }
}

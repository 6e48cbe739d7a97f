//! Module-scope variables: storage buffers and private globals.

use spvs_ir::{
    std430_offsets, Annotation, Decoration, GlobalId, StorageClass, TypeData, ValueRef,
};
use tracing::debug;

use super::Generator;
use crate::predicates;

impl Generator {
    /// Declare one `StorageBuffer` variable per configured binding.
    ///
    /// Each buffer is a `Block` struct of 32-bit numeric scalars and
    /// vectors, decorated with std430 member offsets, in descriptor set 0.
    pub fn generate_storage_buffers(&mut self) -> Vec<GlobalId> {
        let mut buffers = Vec::with_capacity(self.config().storage_buffers);
        for binding in 0..self.config().storage_buffers {
            let Some(var) = self.storage_buffer(u32::try_from(binding).unwrap_or(u32::MAX)) else {
                continue;
            };
            buffers.push(var);
        }
        debug!(count = buffers.len(), "storage buffers");
        buffers
    }

    fn storage_buffer(&mut self, binding: u32) -> Option<GlobalId> {
        let n = self.range(1, 4);
        let mut members = Vec::with_capacity(n as usize);
        for _ in 0..n {
            members.push(self.buffer_member());
        }
        let offsets = std430_offsets(&self.ctx.module, &members)?;
        let block = self.ctx.add_to_global_table(TypeData::Struct { members }).id;

        let module = &mut self.ctx.module;
        if !module.is_block(block) {
            module.annotate(Annotation::Decorate {
                target: block,
                decoration: Decoration::Block,
            });
            for (member, offset) in (0u32..).zip(offsets) {
                module.annotate(Annotation::MemberDecorate {
                    target: block,
                    member,
                    decoration: Decoration::Offset(offset),
                });
            }
        }

        let ValueRef::Global(var) = self.ctx.create_on_demand_variable(
            StorageClass::StorageBuffer,
            block,
            self.session.rng(),
        )?
        else {
            return None;
        };
        let module = &mut self.ctx.module;
        module.annotate(Annotation::Decorate {
            target: var,
            decoration: Decoration::DescriptorSet(0),
        });
        module.annotate(Annotation::Decorate {
            target: var,
            decoration: Decoration::Binding(binding),
        });
        Some(var)
    }

    fn buffer_member(&mut self) -> GlobalId {
        let scalar = match self.range(0, 2) {
            0 => TypeData::Int {
                width: 32,
                signed: true,
            },
            1 => TypeData::Int {
                width: 32,
                signed: false,
            },
            _ => TypeData::Float { width: 32 },
        };
        let scalar = self.ctx.add_to_global_table(scalar).id;
        if self.session.chance(0.5) {
            return scalar;
        }
        let count = self.range(2, 4);
        self.ctx
            .add_to_global_table(TypeData::Vector {
                element: scalar,
                count,
            })
            .id
    }

    /// Declare the configured number of initialized `Private` variables
    /// over existing data types.
    pub fn generate_private_variables(&mut self) -> Vec<GlobalId> {
        let mut vars = Vec::new();
        for _ in 0..self.config().private_variables {
            let Some(ty) = self.variable_type() else {
                break;
            };
            if let Some(ValueRef::Global(var)) =
                self.ctx
                    .create_on_demand_variable(StorageClass::Private, ty, self.session.rng())
            {
                vars.push(var);
            }
        }
        debug!(count = vars.len(), "private variables");
        vars
    }

    /// Random existing type a `Private` or `Function` variable may hold.
    pub(crate) fn variable_type(&mut self) -> Option<GlobalId> {
        let module = &self.ctx.module;
        let candidates: Vec<GlobalId> = module
            .globals
            .types()
            .map(|(id, _)| id)
            .filter(|&ty| predicates::is_data(module, ty) && !module.is_block(ty))
            .collect();
        self.pick(&candidates)
    }
}

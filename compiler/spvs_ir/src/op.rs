//! Opcode tags, operator families, marker traits and sampling categories.
//!
//! Every concrete variant the generator can produce is one [`OpKind`].
//! Abstract categories ([`Category`]) are closed lists of kinds; the
//! weight tables in the generator are keyed by `(Category, OpKind)`.

use std::fmt;

use bitflags::bitflags;

/// Operator family of an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    Type,
    Constant,
    Memory,
    Arithmetic,
    Bitwise,
    Logical,
    Conversion,
    Composite,
    ControlFlow,
    Function,
    Extension,
}

impl Family {
    pub const ALL: &'static [Family] = &[
        Family::Type,
        Family::Constant,
        Family::Memory,
        Family::Arithmetic,
        Family::Bitwise,
        Family::Logical,
        Family::Conversion,
        Family::Composite,
        Family::ControlFlow,
        Family::Function,
        Family::Extension,
    ];
}

macro_rules! op_kinds {
    ($($variant:ident => $family:ident),* $(,)?) => {
        /// Concrete instruction variant, named after its opcode minus `Op`.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum OpKind {
            $($variant,)*
        }

        impl OpKind {
            /// Every opcode, in declaration order.
            pub const ALL: &'static [OpKind] = &[$(OpKind::$variant,)*];

            /// The assembly mnemonic, e.g. `OpIAdd`.
            pub fn name(self) -> &'static str {
                match self {
                    $(OpKind::$variant => concat!("Op", stringify!($variant)),)*
                }
            }

            pub fn family(self) -> Family {
                match self {
                    $(OpKind::$variant => Family::$family,)*
                }
            }
        }
    };
}

op_kinds! {
    // Types
    TypeVoid => Type,
    TypeBool => Type,
    TypeInt => Type,
    TypeFloat => Type,
    TypeVector => Type,
    TypeMatrix => Type,
    TypeArray => Type,
    TypeStruct => Type,
    TypePointer => Type,
    TypeFunction => Type,

    // Constants
    ConstantTrue => Constant,
    ConstantFalse => Constant,
    Constant => Constant,
    ConstantComposite => Constant,

    // Memory
    Variable => Memory,
    Load => Memory,
    Store => Memory,
    AccessChain => Memory,

    // Arithmetic
    SNegate => Arithmetic,
    FNegate => Arithmetic,
    IAdd => Arithmetic,
    FAdd => Arithmetic,
    ISub => Arithmetic,
    FSub => Arithmetic,
    IMul => Arithmetic,
    FMul => Arithmetic,
    UDiv => Arithmetic,
    SDiv => Arithmetic,
    FDiv => Arithmetic,
    UMod => Arithmetic,
    SRem => Arithmetic,
    SMod => Arithmetic,
    FRem => Arithmetic,
    FMod => Arithmetic,
    VectorTimesScalar => Arithmetic,
    MatrixTimesScalar => Arithmetic,
    VectorTimesMatrix => Arithmetic,
    MatrixTimesVector => Arithmetic,
    MatrixTimesMatrix => Arithmetic,
    OuterProduct => Arithmetic,
    Dot => Arithmetic,

    // Bitwise
    ShiftRightLogical => Bitwise,
    ShiftRightArithmetic => Bitwise,
    ShiftLeftLogical => Bitwise,
    BitwiseOr => Bitwise,
    BitwiseXor => Bitwise,
    BitwiseAnd => Bitwise,
    Not => Bitwise,
    BitCount => Bitwise,
    BitReverse => Bitwise,

    // Logical and relational
    Any => Logical,
    All => Logical,
    IsNan => Logical,
    IsInf => Logical,
    LogicalEqual => Logical,
    LogicalNotEqual => Logical,
    LogicalOr => Logical,
    LogicalAnd => Logical,
    LogicalNot => Logical,
    Select => Logical,
    IEqual => Logical,
    INotEqual => Logical,
    UGreaterThan => Logical,
    SGreaterThan => Logical,
    UGreaterThanEqual => Logical,
    SGreaterThanEqual => Logical,
    ULessThan => Logical,
    SLessThan => Logical,
    ULessThanEqual => Logical,
    SLessThanEqual => Logical,
    FOrdEqual => Logical,
    FOrdNotEqual => Logical,
    FOrdLessThan => Logical,
    FOrdGreaterThan => Logical,
    FOrdLessThanEqual => Logical,
    FOrdGreaterThanEqual => Logical,

    // Conversion
    ConvertFToU => Conversion,
    ConvertFToS => Conversion,
    ConvertSToF => Conversion,
    ConvertUToF => Conversion,
    UConvert => Conversion,
    SConvert => Conversion,
    FConvert => Conversion,
    Bitcast => Conversion,

    // Composite
    VectorExtractDynamic => Composite,
    VectorInsertDynamic => Composite,
    VectorShuffle => Composite,
    CompositeConstruct => Composite,
    CompositeExtract => Composite,
    CompositeInsert => Composite,
    CopyObject => Composite,
    Transpose => Composite,

    // Structured control flow
    SelectionMerge => ControlFlow,
    BranchConditional => ControlFlow,
    Branch => ControlFlow,
    Label => ControlFlow,
    Return => ControlFlow,

    // Functions
    Function => Function,
    FunctionParameter => Function,
    FunctionEnd => Function,

    // Extended instruction sets
    ExtInst => Extension,
}

bitflags! {
    /// Cross-cutting marker traits of an opcode.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct OpTraits: u8 {
        /// No result type operand.
        const UNTYPED = 1 << 0;
        /// No result id in the emitted text.
        const VOID_OP = 1 << 1;
        /// Integer operands are searched among signed types.
        const SIGNED = 1 << 2;
        /// Integer operands are searched among unsigned types.
        const UNSIGNED = 1 << 3;
    }
}

impl OpKind {
    pub fn traits(self) -> OpTraits {
        match self {
            OpKind::Store
            | OpKind::SelectionMerge
            | OpKind::BranchConditional
            | OpKind::Branch
            | OpKind::Return
            | OpKind::FunctionEnd => OpTraits::UNTYPED | OpTraits::VOID_OP,

            OpKind::Label => OpTraits::UNTYPED,

            OpKind::SDiv
            | OpKind::SRem
            | OpKind::SMod
            | OpKind::SGreaterThan
            | OpKind::SGreaterThanEqual
            | OpKind::SLessThan
            | OpKind::SLessThanEqual
            | OpKind::ConvertSToF
            | OpKind::ConvertFToS
            | OpKind::SConvert => OpTraits::SIGNED,

            OpKind::UDiv
            | OpKind::UMod
            | OpKind::UGreaterThan
            | OpKind::UGreaterThanEqual
            | OpKind::ULessThan
            | OpKind::ULessThanEqual
            | OpKind::ConvertUToF
            | OpKind::ConvertFToU
            | OpKind::UConvert => OpTraits::UNSIGNED,

            _ => OpTraits::empty(),
        }
    }

    /// `true` if the emitted line binds a `%id`.
    pub fn has_result(self) -> bool {
        !self.traits().contains(OpTraits::VOID_OP)
    }

    /// `true` if the instruction carries a result type.
    pub fn is_typed(self) -> bool {
        !self.traits().contains(OpTraits::UNTYPED)
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Abstract category the delegator can be asked to produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Any sampled type (void and pointers are only made on demand).
    Type,
    ScalarType,
    NumericType,
    /// Numeric scalars and vectors: function parameter slots.
    ArithmeticType,
    ContainerType,
    /// Array elements: no nested aggregates.
    ArrayElementType,
    /// Struct members: no nested structs.
    StructMemberType,
    Constant,
    /// Root statement category.
    Statement,
}

impl Category {
    /// Concrete variants, in the fixed order the weighting policies use.
    pub fn members(self) -> &'static [OpKind] {
        match self {
            Category::Type => &[
                OpKind::TypeBool,
                OpKind::TypeInt,
                OpKind::TypeFloat,
                OpKind::TypeVector,
                OpKind::TypeMatrix,
                OpKind::TypeArray,
                OpKind::TypeStruct,
                OpKind::TypeFunction,
            ],
            Category::ScalarType => &[OpKind::TypeBool, OpKind::TypeInt, OpKind::TypeFloat],
            Category::NumericType => &[OpKind::TypeInt, OpKind::TypeFloat],
            Category::ArithmeticType => &[OpKind::TypeInt, OpKind::TypeFloat, OpKind::TypeVector],
            Category::ContainerType => &[
                OpKind::TypeVector,
                OpKind::TypeMatrix,
                OpKind::TypeArray,
                OpKind::TypeStruct,
            ],
            Category::ArrayElementType => &[
                OpKind::TypeBool,
                OpKind::TypeInt,
                OpKind::TypeFloat,
                OpKind::TypeVector,
            ],
            Category::StructMemberType => &[
                OpKind::TypeBool,
                OpKind::TypeInt,
                OpKind::TypeFloat,
                OpKind::TypeVector,
                OpKind::TypeMatrix,
                OpKind::TypeArray,
            ],
            Category::Constant => &[
                OpKind::ConstantTrue,
                OpKind::ConstantFalse,
                OpKind::Constant,
                OpKind::ConstantComposite,
            ],
            Category::Statement => STATEMENTS,
        }
    }

    /// `true` for the type categories (subject to the excluded-type set).
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Category::Type
                | Category::ScalarType
                | Category::NumericType
                | Category::ArithmeticType
                | Category::ContainerType
                | Category::ArrayElementType
                | Category::StructMemberType
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Type => "Type",
            Category::ScalarType => "ScalarType",
            Category::NumericType => "NumericType",
            Category::ArithmeticType => "ArithmeticType",
            Category::ContainerType => "ContainerType",
            Category::ArrayElementType => "ArrayElementType",
            Category::StructMemberType => "StructMemberType",
            Category::Constant => "Constant",
            Category::Statement => "Statement",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sampled statements. Markers (labels, branches, returns, function
/// delimiters) are emitted structurally and never sampled.
const STATEMENTS: &[OpKind] = &[
    OpKind::Variable,
    OpKind::Load,
    OpKind::Store,
    OpKind::AccessChain,
    OpKind::SNegate,
    OpKind::FNegate,
    OpKind::IAdd,
    OpKind::FAdd,
    OpKind::ISub,
    OpKind::FSub,
    OpKind::IMul,
    OpKind::FMul,
    OpKind::UDiv,
    OpKind::SDiv,
    OpKind::FDiv,
    OpKind::UMod,
    OpKind::SRem,
    OpKind::SMod,
    OpKind::FRem,
    OpKind::FMod,
    OpKind::VectorTimesScalar,
    OpKind::MatrixTimesScalar,
    OpKind::VectorTimesMatrix,
    OpKind::MatrixTimesVector,
    OpKind::MatrixTimesMatrix,
    OpKind::OuterProduct,
    OpKind::Dot,
    OpKind::ShiftRightLogical,
    OpKind::ShiftRightArithmetic,
    OpKind::ShiftLeftLogical,
    OpKind::BitwiseOr,
    OpKind::BitwiseXor,
    OpKind::BitwiseAnd,
    OpKind::Not,
    OpKind::BitCount,
    OpKind::BitReverse,
    OpKind::Any,
    OpKind::All,
    OpKind::IsNan,
    OpKind::IsInf,
    OpKind::LogicalEqual,
    OpKind::LogicalNotEqual,
    OpKind::LogicalOr,
    OpKind::LogicalAnd,
    OpKind::LogicalNot,
    OpKind::Select,
    OpKind::IEqual,
    OpKind::INotEqual,
    OpKind::UGreaterThan,
    OpKind::SGreaterThan,
    OpKind::UGreaterThanEqual,
    OpKind::SGreaterThanEqual,
    OpKind::ULessThan,
    OpKind::SLessThan,
    OpKind::ULessThanEqual,
    OpKind::SLessThanEqual,
    OpKind::FOrdEqual,
    OpKind::FOrdNotEqual,
    OpKind::FOrdLessThan,
    OpKind::FOrdGreaterThan,
    OpKind::FOrdLessThanEqual,
    OpKind::FOrdGreaterThanEqual,
    OpKind::ConvertFToU,
    OpKind::ConvertFToS,
    OpKind::ConvertSToF,
    OpKind::ConvertUToF,
    OpKind::UConvert,
    OpKind::SConvert,
    OpKind::FConvert,
    OpKind::Bitcast,
    OpKind::VectorExtractDynamic,
    OpKind::VectorInsertDynamic,
    OpKind::VectorShuffle,
    OpKind::CompositeConstruct,
    OpKind::CompositeExtract,
    OpKind::CompositeInsert,
    OpKind::CopyObject,
    OpKind::Transpose,
    OpKind::SelectionMerge,
    OpKind::ExtInst,
];

#[cfg(test)]
mod tests;

//! Operator kinds and their SQL tokens.
//!
//! Each kind maps to a fixed token through a `const fn` table, so the
//! renderer never builds operator text at runtime.

/// Where a unary operator sits relative to its operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fixity {
    Prefix,
    Postfix,
}

/// Unary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `@x` (absolute value)
    Abs,
    /// `x!`
    Factorial,
    /// `NOT x`
    Not,
}

impl UnaryOp {
    /// Token and fixity.
    pub const fn parts(self) -> (&'static str, Fixity) {
        match self {
            UnaryOp::Neg => ("-", Fixity::Prefix),
            UnaryOp::Abs => ("@", Fixity::Prefix),
            UnaryOp::Factorial => ("!", Fixity::Postfix),
            UnaryOp::Not => ("NOT", Fixity::Prefix),
        }
    }

    /// The SQL token.
    pub const fn token(self) -> &'static str {
        self.parts().0
    }

    pub const fn fixity(self) -> Fixity {
        self.parts().1
    }

    /// Whether a space separates the token from its operand.
    ///
    /// True iff the token character next to the operand is alphanumeric,
    /// so `NOT x` keeps its space and `-x` does not.
    pub const fn spaced(self) -> bool {
        let token = self.token().as_bytes();
        let adjacent = match self.fixity() {
            Fixity::Prefix => token[token.len() - 1],
            Fixity::Postfix => token[0],
        };
        adjacent.is_ascii_alphanumeric()
    }
}

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    Is,
    IsNot,
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Ne,
    Like,
    NotLike,
    Similar,
    NotSimilar,
    Match,
    IMatch,
    NotMatch,
    NotIMatch,
    Contains,
    ContainedBy,
    Union,
    Intersect,
    In,
    NotIn,
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,
}

impl BinaryOp {
    /// The SQL token.
    pub const fn token(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Exp => "^",
            BinaryOp::Is => "IS",
            BinaryOp::IsNot => "IS NOT",
            BinaryOp::Gt => ">",
            BinaryOp::Gte => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Lte => "<=",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
            BinaryOp::Like => "LIKE",
            BinaryOp::NotLike => "NOT LIKE",
            BinaryOp::Similar => "SIMILAR TO",
            BinaryOp::NotSimilar => "NOT SIMILAR TO",
            BinaryOp::Match => "~",
            BinaryOp::IMatch => "~*",
            BinaryOp::NotMatch => "!~",
            BinaryOp::NotIMatch => "!~*",
            BinaryOp::Contains => "@>",
            BinaryOp::ContainedBy => "<@",
            BinaryOp::Union => "||",
            BinaryOp::Intersect => "&&",
            BinaryOp::In => "IN",
            BinaryOp::NotIn => "NOT IN",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "#",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
        }
    }
}

/// Variadic boolean connectives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    /// The SQL keyword.
    pub const fn token(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

/// Operators that take a sub-query operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubQueryOp {
    Exists,
    All,
    Some,
    Any,
}

impl SubQueryOp {
    pub const fn token(self) -> &'static str {
        match self {
            SubQueryOp::Exists => "EXISTS",
            SubQueryOp::All => "ALL",
            SubQueryOp::Some => "SOME",
            SubQueryOp::Any => "ANY",
        }
    }
}

/// Join kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Natural,
}

impl JoinKind {
    /// The SQL keyword.
    pub const fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::RightOuter => "RIGHT OUTER JOIN",
            JoinKind::FullOuter => "FULL OUTER JOIN",
            JoinKind::Natural => "NATURAL JOIN",
        }
    }

    /// Whether this kind takes an ON predicate.
    pub const fn needs_predicate(self) -> bool {
        !matches!(self, JoinKind::Natural)
    }
}

/// ORDER BY direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub const fn keyword(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unary_spacing_follows_adjacent_character() {
        assert!(UnaryOp::Not.spaced());
        assert!(!UnaryOp::Neg.spaced());
        assert!(!UnaryOp::Abs.spaced());
        assert!(!UnaryOp::Factorial.spaced());
    }

    #[test]
    fn join_predicates() {
        assert!(JoinKind::Inner.needs_predicate());
        assert!(JoinKind::FullOuter.needs_predicate());
        assert!(!JoinKind::Natural.needs_predicate());
    }
}

use core::fmt;

// 式の木構造。文法の生成規則ごとに 1 つの variant を持つ。
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    Identifier(String),
    Array(Vec<Expression>),
    Object(Vec<(String, Expression)>),
    // plain call of a context function: `name(args)`
    Call {
        function: String,
        arguments: Vec<Expression>,
    },
    // access chain hanging off a base: `base.a?.b(c)[d]`
    Chain {
        base: Box<Expression>,
        links: Vec<ChainLink>,
    },
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Attaches access links to `base`. An empty link list yields `base` itself.
    pub fn chain(base: Expression, links: Vec<ChainLink>) -> Self {
        if links.is_empty() {
            base
        } else {
            Expression::Chain {
                base: Box::new(base),
                links,
            }
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Expression::Literal(_) | Expression::Identifier(_) => 1,
            Expression::Array(items) => 1 + items.iter().map(Expression::size).sum::<usize>(),
            Expression::Object(entries) => {
                1 + entries.iter().map(|(_, e)| e.size()).sum::<usize>()
            }
            Expression::Call { arguments, .. } => {
                1 + arguments.iter().map(Expression::size).sum::<usize>()
            }
            Expression::Chain { base, links } => {
                base.size() + links.iter().map(ChainLink::size).sum::<usize>()
            }
            Expression::Unary { operand, .. } => 1 + operand.size(),
            Expression::Binary { left, right, .. } => 1 + left.size() + right.size(),
        }
    }
}

// リテラル
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
    Undefined,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChainLink {
    Member {
        name: String,
        optional: bool,
    },
    MethodCall {
        name: String,
        arguments: Vec<Expression>,
        optional: bool,
    },
    Index(Box<Expression>),
}

impl ChainLink {
    pub fn is_optional(&self) -> bool {
        match self {
            ChainLink::Member { optional, .. } | ChainLink::MethodCall { optional, .. } => {
                *optional
            }
            ChainLink::Index(_) => false,
        }
    }

    fn size(&self) -> usize {
        match self {
            ChainLink::Member { .. } => 1,
            ChainLink::MethodCall { arguments, .. } => {
                1 + arguments.iter().map(Expression::size).sum::<usize>()
            }
            ChainLink::Index(index) => 1 + index.size(),
        }
    }
}

// 単項演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Negate,
}

impl UnaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Negate => "-",
        }
    }
}

// 二項演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Or,
    And,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::LessThanEqual => "<=",
            BinaryOperator::GreaterThanEqual => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOperator::Or | BinaryOperator::And)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "{:?}", s),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Null => write!(f, "null"),
            Literal::Undefined => write!(f, "undefined"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter, items: &[Expression]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

/// Canonical, fully parenthesized rendering of the tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Literal(lit) => write!(f, "{}", lit),
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::Array(items) => {
                write!(f, "[")?;
                write_list(f, items)?;
                write!(f, "]")
            }
            Expression::Object(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Expression::Call {
                function,
                arguments,
            } => {
                write!(f, "{}(", function)?;
                write_list(f, arguments)?;
                write!(f, ")")
            }
            Expression::Chain { base, links } => {
                write!(f, "{}", base)?;
                for link in links {
                    match link {
                        ChainLink::Member { name, optional } => {
                            write!(f, "{}{}", if *optional { "?." } else { "." }, name)?
                        }
                        ChainLink::MethodCall {
                            name,
                            arguments,
                            optional,
                        } => {
                            write!(f, "{}{}(", if *optional { "?." } else { "." }, name)?;
                            write_list(f, arguments)?;
                            write!(f, ")")?;
                        }
                        ChainLink::Index(index) => write!(f, "[{}]", index)?,
                    }
                }
                Ok(())
            }
            Expression::Unary { op, operand } => write!(f, "({}{})", op.symbol(), operand),
            Expression::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
        }
    }
}

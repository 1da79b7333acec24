use model::{FunctionDeclaration, Parameter, SyntaxError, TokenKind};
use crate::parser::Parser;
use crate::statements::StatementParser;
use crate::types::TypeParser;

/// Function declaration parsing
pub(crate) trait DeclarationParser {
    fn parse_function(&mut self) -> Result<FunctionDeclaration, SyntaxError>;
}

impl<'a> DeclarationParser for Parser<'a> {
    /// fun IDENT ( [parameterList] ) : type block
    fn parse_function(&mut self) -> Result<FunctionDeclaration, SyntaxError> {
        self.expect(TokenKind::Fun, "'fun'")?;
        let name = self.expect(TokenKind::Identifier, "function name")?.text;

        self.expect(TokenKind::OpenParenthesis, "'('")?;
        let parameters = if self.check(TokenKind::CloseParenthesis) {
            Vec::new()
        } else {
            self.parse_parameter_list()?
        };
        self.expect(TokenKind::CloseParenthesis, "')'")?;

        self.expect(TokenKind::Colon, "':' before return type")?;
        let return_type = self.parse_type()?;
        let body = self.parse_block()?;

        Ok(FunctionDeclaration {
            name,
            parameters,
            return_type,
            body,
        })
    }
}

impl<'a> Parser<'a> {
    /// parameter (, parameter)* with no trailing comma
    fn parse_parameter_list(&mut self) -> Result<Vec<Parameter>, SyntaxError> {
        let mut params = vec![self.parse_parameter()?];
        while self.match_token(TokenKind::Comma) {
            params.push(self.parse_parameter()?);
        }
        Ok(params)
    }

    fn parse_parameter(&mut self) -> Result<Parameter, SyntaxError> {
        let name = self.expect(TokenKind::Identifier, "parameter name")?.text;
        self.expect(TokenKind::Colon, "':' after parameter name")?;
        let ty = self.parse_type()?;
        Ok(Parameter { name, ty })
    }
}
